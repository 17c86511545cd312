//! Reference finder over a [`ScopeIndex`].

use crate::scope::{Name, NameRole, ScopeIndex};
use language_core::{normalize_occurrences, Occurrence, OccurrenceKind};

/// Occurrences of the binding of the identifier at `offset`.
///
/// The binding is the name in the scope it resolves to: every occurrence
/// of the same name resolving to the same scope belongs to it, while
/// nested scopes writing the name are left out. Plain variables have no
/// declaration syntax, so the first write of a binding without a `def`,
/// `class`, parameter or import stands in as its declaration.
pub fn find_references(index: &ScopeIndex, offset: u32) -> Vec<Occurrence> {
    let Some(target) = index.name_at(offset) else {
        return Vec::new();
    };
    let scope = index.resolve(target);
    log::debug!("'{}' resolves to scope {scope}", target.name);

    let binding: Vec<&Name> = index
        .names
        .iter()
        .filter(|n| n.name == target.name && index.resolve(n) == scope)
        .collect();
    let declared = binding.iter().any(|n| n.role == NameRole::Declaration);
    let first_write = (!declared)
        .then(|| binding.iter().find(|n| n.role == NameRole::Write))
        .flatten()
        .map(|n| n.range);

    let mut occurrences: Vec<Occurrence> = binding
        .iter()
        .map(|name| {
            let kind = match name.role {
                NameRole::Declaration => OccurrenceKind::Decl,
                NameRole::Write if Some(name.range) == first_write => OccurrenceKind::Decl,
                NameRole::Write => OccurrenceKind::Mut,
                NameRole::Read => OccurrenceKind::Ref,
            };
            Occurrence::new(name.range, kind)
        })
        .collect();
    normalize_occurrences(&mut occurrences);
    occurrences
}
