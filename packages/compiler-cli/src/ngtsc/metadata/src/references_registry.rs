//! Registry of references between declarations.

use crate::ngtsc::imports::Reference;
use ts::Declaration;

/// Accumulates "source declaration makes these references visible" edges
/// for later visibility analysis. An implementation that ignores the calls
/// is valid: the registry is an optional collaborator, not a load-bearing
/// dependency of every compilation mode.
pub trait ReferencesRegistry {
    fn add(&self, source: &Declaration, references: &[Reference]);
}

/// Does nothing with the references. Used by tools that do not perform
/// entry-point visibility analysis.
#[derive(Debug, Default)]
pub struct NoopReferencesRegistry;

impl ReferencesRegistry for NoopReferencesRegistry {
    fn add(&self, _source: &Declaration, _references: &[Reference]) {}
}
