//! Name-based identity between lists.
//!
//! Pantry and shopping-list records never share ids; they are linked only by
//! a normalized name. Two lookups exist and they intentionally differ:
//!
//! * [`find_exact`] is what purchase reconciliation uses. Only identical
//!   normalized names match, so "milk" never merges into "coconut milk".
//! * [`find_fuzzy`] serves free-text lookups typed by a person. It falls back
//!   from exact match to substring and then reverse-substring containment.

use crate::models::Item;

pub trait NameNormalizer {
    fn normalize(&self, name: &str) -> String;
}

/// Trims surrounding whitespace and lowercases.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimLowercase;

impl NameNormalizer for TrimLowercase {
    fn normalize(&self, name: &str) -> String {
        name.trim().to_lowercase()
    }
}

impl<F> NameNormalizer for F
where
    F: Fn(&str) -> String,
{
    fn normalize(&self, name: &str) -> String {
        self(name)
    }
}

pub fn normalize_name(name: &str) -> String {
    TrimLowercase.normalize(name)
}

/// Index of the first item whose normalized name equals the normalized `name`.
pub fn find_exact<N>(items: &[Item], name: &str, normalizer: &N) -> Option<usize>
where
    N: NameNormalizer + ?Sized,
{
    let key = normalizer.normalize(name);
    position_by_key(items, &key, normalizer)
}

/// Exact match, then the first item whose name contains the query, then the
/// first item whose name is contained in the query. Blank queries match nothing.
pub fn find_fuzzy<N>(items: &[Item], query: &str, normalizer: &N) -> Option<usize>
where
    N: NameNormalizer + ?Sized,
{
    let key = normalizer.normalize(query);
    if key.is_empty() {
        return None;
    }

    if let Some(idx) = position_by_key(items, &key, normalizer) {
        return Some(idx);
    }

    let names: Vec<String> = items
        .iter()
        .map(|item| normalizer.normalize(&item.name))
        .collect();

    names
        .iter()
        .position(|name| !name.is_empty() && name.contains(&key))
        .or_else(|| {
            names
                .iter()
                .position(|name| !name.is_empty() && key.contains(name.as_str()))
        })
}

fn position_by_key<N>(items: &[Item], key: &str, normalizer: &N) -> Option<usize>
where
    N: NameNormalizer + ?Sized,
{
    items
        .iter()
        .position(|item| normalizer.normalize(&item.name) == key)
}
