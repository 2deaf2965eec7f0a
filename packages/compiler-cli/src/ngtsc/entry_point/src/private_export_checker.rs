// Private Export Checker
//
// Flags declarations which are visible to consumers of an entry point
// (through the reference graph) but not themselves exported from it.

use std::collections::HashSet;

use super::reference_graph::ReferenceGraph;
use crate::ngtsc::diagnostics::{make_diagnostic, DiagnosticNode, ErrorCode};
use ts::{Diagnostic, DiagnosticCategory, DeclarationId, TypeChecker};

/// Verify that every declaration reachable by consumers of `entry_point`
/// is actually exported from it. Each offending declaration is reported at
/// most once, even when multiple exports make it visible.
pub fn check_for_private_exports(
    entry_point: &str,
    checker: &TypeChecker,
    ref_graph: &ReferenceGraph,
) -> Vec<Diagnostic> {
    let top_level_exports = checker.get_exports_of_module(entry_point);

    // Marks declarations (by identity) which are exported.
    let exported: HashSet<DeclarationId> =
        top_level_exports.iter().map(|decl| decl.id()).collect();

    let mut diagnostics = Vec::new();
    let mut checked_set: HashSet<DeclarationId> = HashSet::new();

    for main_export in &top_level_exports {
        for transitive_reference in ref_graph.transitive_references_of(&main_export.id()) {
            if exported.contains(&transitive_reference)
                || !checked_set.insert(transitive_reference.clone())
            {
                continue;
            }
            let Some(decl) = ref_graph.node(&transitive_reference) else {
                continue;
            };
            let Some(name) = decl.name.as_deref() else {
                continue;
            };

            let descriptor = decl.kind.descriptor();
            let visible_via = ref_graph
                .path_from(&main_export.id(), &transitive_reference)
                .map(|path| {
                    path.iter()
                        .map(|d| d.name.clone().unwrap_or_else(|| "(unnamed)".to_string()))
                        .collect::<Vec<_>>()
                        .join(" -> ")
                })
                .unwrap_or_else(|| format!("the library's module exports ({})", name));

            let node = DiagnosticNode::new(decl.file_name.clone(), decl.name_span);
            diagnostics.push(
                make_diagnostic(
                    ErrorCode::SymbolNotExported,
                    &node,
                    format!(
                        "Unsupported private {descriptor} {name}. This {descriptor} is visible \
                         to consumers via {visible_via}, but is not exported from the top-level \
                         library entrypoint."
                    )
                    .into(),
                    None,
                    DiagnosticCategory::Error,
                )
                .into(),
            );
        }
    }

    diagnostics
}
