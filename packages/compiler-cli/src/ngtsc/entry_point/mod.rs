pub mod src {
    pub mod private_export_checker;
    pub mod reference_graph;
}

#[cfg(test)]
mod test;

pub use src::private_export_checker::check_for_private_exports;
pub use src::reference_graph::{ReferenceGraph, ReferenceGraphAdapter};
