//! Typed pointers between declarations.

use std::rc::Rc;
use ts::Declaration;

/// A `Reference` is a pointer to some declaration, as seen from a
/// particular context (e.g. a component referencing a directive it uses).
/// The optional debug name is purely for diagnostics and logging.
#[derive(Debug, Clone)]
pub struct Reference {
    pub node: Rc<Declaration>,
    pub debug_name: Option<String>,
}

impl Reference {
    pub fn new(node: Rc<Declaration>) -> Self {
        let debug_name = node.name.clone();
        Reference { node, debug_name }
    }

    pub fn with_debug_name(node: Rc<Declaration>, debug_name: impl Into<String>) -> Self {
        Reference {
            node,
            debug_name: Some(debug_name.into()),
        }
    }
}
