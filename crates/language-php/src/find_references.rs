//! Reference finder over a [`SymbolIndex`].

use crate::index::{Symbol, SymbolIndex, SymbolRole};
use language_core::{normalize_occurrences, Occurrence, OccurrenceKind};

/// Occurrences of whatever the name at `offset` denotes.
///
/// A variable without a parameter or `static` declaration is declared by
/// its first assignment.
pub fn find_references(index: &SymbolIndex, offset: u32) -> Vec<Occurrence> {
    let Some(target) = index.symbol_at(offset) else {
        return Vec::new();
    };
    let binding = index.binding(target);
    log::debug!("'{}' is {binding:?}", target.name);

    let symbols: Vec<&Symbol> = index
        .symbols
        .iter()
        .filter(|s| index.binding(s) == binding)
        .collect();
    let declared = symbols
        .iter()
        .any(|s| matches!(s.role, SymbolRole::Declaration | SymbolRole::Import));
    let first_write = (!declared)
        .then(|| symbols.iter().find(|s| s.role == SymbolRole::Write))
        .flatten()
        .map(|s| s.range);

    let mut occurrences: Vec<Occurrence> = symbols
        .iter()
        .map(|symbol| {
            let kind = match symbol.role {
                SymbolRole::Declaration | SymbolRole::Import => OccurrenceKind::Decl,
                SymbolRole::Write if Some(symbol.range) == first_write => OccurrenceKind::Decl,
                SymbolRole::Write => OccurrenceKind::Mut,
                SymbolRole::Read => OccurrenceKind::Ref,
            };
            Occurrence::new(symbol.range, kind)
        })
        .collect();
    normalize_occurrences(&mut occurrences);
    occurrences
}
