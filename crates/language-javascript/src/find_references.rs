//! Reference finder over a [`ProgramIndex`].

use crate::oxc_adapter::{DeclarationKind, Identifier, IdentifierRole, ProgramIndex};
use language_core::{normalize_occurrences, Occurrence, OccurrenceKind};

/// Occurrences of the binding of the identifier at `offset`.
///
/// Locally bound names yield their declaration, reads and writes. Names
/// without a binding are globals: every other unbound identifier with the
/// same name is part of the result. Symbols reported as redeclared in
/// their scope have no well-defined binding and yield nothing.
pub fn find_references(index: &ProgramIndex, offset: u32) -> Vec<Occurrence> {
    let Some(target) = identifier_at(index, offset) else {
        return Vec::new();
    };

    if target.symbol.is_some_and(|symbol| index.redeclared.contains(&symbol)) {
        log::debug!("'{}' is redeclared, no binding", target.name);
        return Vec::new();
    }

    match target.symbol {
        Some(symbol) => occurrences_of_symbol(index, symbol),
        None => global_occurrences(index, &target.name),
    }
}

/// Innermost identifier containing `offset`.
pub fn identifier_at(index: &ProgramIndex, offset: u32) -> Option<&Identifier> {
    // identifiers never nest, so the first hit is the only one
    let candidates = index.identifiers.partition_point(|i| i.span.end <= offset);
    index.identifiers[candidates..]
        .iter()
        .take_while(|i| i.span.start <= offset)
        .find(|i| i.span.contains(offset))
}

/// Every occurrence resolved to `symbol`.
pub fn occurrences_of_symbol(index: &ProgramIndex, symbol: u32) -> Vec<Occurrence> {
    let mut occurrences: Vec<Occurrence> = index
        .identifiers
        .iter()
        .filter(|i| i.symbol == Some(symbol))
        .map(to_occurrence)
        .collect();
    normalize_occurrences(&mut occurrences);
    occurrences
}

/// Occurrences of an unbound name.
pub fn global_occurrences(index: &ProgramIndex, name: &str) -> Vec<Occurrence> {
    if name == "default" {
        return Vec::new();
    }
    let mut occurrences: Vec<Occurrence> = index
        .identifiers
        .iter()
        .filter(|i| i.symbol.is_none() && i.name == name)
        .map(to_occurrence)
        .collect();
    normalize_occurrences(&mut occurrences);
    occurrences
}

pub(crate) fn to_occurrence(identifier: &Identifier) -> Occurrence {
    let kind = match identifier.role {
        IdentifierRole::Declaration(DeclarationKind::DefaultImport) => OccurrenceKind::Defimp,
        IdentifierRole::Declaration(DeclarationKind::NamedImport) => OccurrenceKind::Namimp,
        IdentifierRole::Declaration(_) => OccurrenceKind::Decl,
        IdentifierRole::Read => OccurrenceKind::Ref,
        IdentifierRole::Write => OccurrenceKind::Mut,
    };
    let occurrence = Occurrence::new(identifier.span, kind);
    match identifier.rename {
        Some(hint) => occurrence.with_rename(hint),
        None => occurrence,
    }
}
