//! Keeps the selected knowledge base consistent with the fetched list

use super::KnowledgeBaseName;

/// Re-derive the selection after the list changed.
///
/// A selection still present in `available` is kept. Otherwise the
/// configured default wins when it is listed, then the first entry. An
/// empty list always yields no selection.
pub fn reconcile_selection(
    current: Option<&KnowledgeBaseName>,
    available: &[KnowledgeBaseName],
    default: Option<&KnowledgeBaseName>,
) -> Option<KnowledgeBaseName> {
    if let Some(current) = current {
        if available.contains(current) {
            return Some(current.clone());
        }
    }

    default
        .filter(|d| available.contains(d))
        .or_else(|| available.first())
        .cloned()
}
