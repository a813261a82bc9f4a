//! Filter to collapse candidates that share a title.
//!
//! Deduplication is by title string, not by catalog index: two records with
//! the same title (a remake, a re-release) count as one recommendation, and
//! the higher ranked one is kept.

use crate::traits::{RankFilter, RankedItem, Seed};
use catalog::CatalogItem;
use std::collections::HashSet;

/// Keeps only the first candidate for every title.
pub struct DuplicateTitleFilter;

impl RankFilter for DuplicateTitleFilter {
    fn name(&self) -> &str {
        "DuplicateTitleFilter"
    }

    fn apply<'a>(&self, candidates: Vec<RankedItem<'a>>, _seed: &Seed<'_>) -> Vec<RankedItem<'a>> {
        let mut seen: HashSet<&'a str> = HashSet::with_capacity(candidates.len());
        candidates
            .into_iter()
            .filter(|candidate| {
                let item: &'a CatalogItem = candidate.item;
                seen.insert(item.title.as_str())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, title: &str) -> CatalogItem {
        CatalogItem {
            id,
            title: title.to_string(),
            poster_path: None,
            premiere_date: None,
        }
    }

    #[test]
    fn test_duplicate_title_filter_keeps_first() {
        let items = [item(10, "Dune"), item(11, "Arrival"), item(12, "Dune"), item(13, "Arrival")];
        let candidates: Vec<RankedItem> = items
            .iter()
            .enumerate()
            .map(|(index, item)| RankedItem { index, score: 0.5, item })
            .collect();

        let seed = Seed { title: "Sicario" };
        let filtered = DuplicateTitleFilter.apply(candidates, &seed);

        let ids: Vec<u32> = filtered.iter().map(|c| c.item.id).collect();
        assert_eq!(ids, vec![10, 11]);
    }
}
