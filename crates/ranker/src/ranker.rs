//! Similarity Ranker - most similar items for a seed
//!
//! ## Algorithm
//! 1. Read the seed's row of the similarity matrix as (index, score) pairs
//! 2. Stable sort by score descending, so equal scores keep ascending index
//! 3. Drop the first sorted entry (the seed by convention, not checked)
//! 4. Run the filters in order (self title, duplicate titles)
//! 5. Keep at most `limit` entries

use crate::traits::{RankFilter, RankedItem, Seed};
use crate::filters::{DuplicateTitleFilter, SelfTitleFilter};
use catalog::Catalog;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors from the ranking stage.
///
/// Only raised when the caller hands in a seed that is not in the catalog,
/// which means the wiring between resolver and ranker is broken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    #[error("Seed index {index} is out of range for a catalog of {size} items")]
    InvalidSeedIndex { index: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, RankError>;

/// Ranks catalog items by similarity to a seed and prunes the result
/// through a chain of filters.
///
/// ## Usage
/// ```ignore
/// let ranker = SimilarityRanker::new();
/// let similar = ranker.rank(&catalog, seed_index, "Avatar", 30)?;
/// ```
pub struct SimilarityRanker {
    filters: Vec<Box<dyn RankFilter>>,
}

impl SimilarityRanker {
    /// Create a ranker with the standard filters: self title, then
    /// duplicate titles.
    pub fn new() -> Self {
        Self::bare()
            .add_filter(SelfTitleFilter)
            .add_filter(DuplicateTitleFilter)
    }

    /// Create a ranker with no filters (only the positional self drop).
    pub fn bare() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the chain (builder pattern).
    pub fn add_filter(mut self, filter: impl RankFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the installed filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Rank the catalog against the item at `seed_index`.
    ///
    /// # Arguments
    /// * `catalog` - The catalog to rank (one kind only)
    /// * `seed_index` - Position of the seed item
    /// * `self_title` - Title excluded from the output (usually the seed's)
    /// * `limit` - Maximum number of items returned (30 for lists, 6 for panels)
    ///
    /// # Returns
    /// Items ordered by descending similarity, at most `limit`, no title
    /// repeated and none equal to `self_title`.
    #[instrument(skip(self, catalog), fields(kind = %catalog.kind()))]
    pub fn rank<'c>(
        &self,
        catalog: &'c Catalog,
        seed_index: usize,
        self_title: &str,
        limit: usize,
    ) -> Result<Vec<RankedItem<'c>>> {
        let row = catalog
            .similarity_row(seed_index)
            .ok_or(RankError::InvalidSeedIndex {
                index: seed_index,
                size: catalog.len(),
            })?;

        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, f32)> = row.iter().copied().enumerate().collect();

        // Stable: equal scores stay in ascending index order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let mut current: Vec<RankedItem<'c>> = scored
            .into_iter()
            .skip(1)
            .filter_map(|(index, score)| {
                let item = catalog.item(index)?;
                Some(RankedItem { index, score, item })
            })
            .collect();

        let seed = Seed { title: self_title };
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current, &seed);
            debug!(
                "Filter applied: {} ({} -> {} candidates)",
                filter.name(),
                before,
                current.len()
            );
        }

        current.truncate(limit);
        debug!("Ranked {} items for seed {}", current.len(), seed_index);
        Ok(current)
    }
}

impl Default for SimilarityRanker {
    fn default() -> Self {
        Self::new()
    }
}

/// Rank with the standard filters.
pub fn rank<'c>(
    catalog: &'c Catalog,
    seed_index: usize,
    self_title: &str,
    limit: usize,
) -> Result<Vec<RankedItem<'c>>> {
    SimilarityRanker::new().rank(catalog, seed_index, self_title, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{CatalogItem, CatalogKind, SimilarityMatrix};

    fn build_catalog(titles: &[&str], rows: Vec<Vec<f32>>) -> Catalog {
        let items = titles
            .iter()
            .enumerate()
            .map(|(i, title)| CatalogItem {
                id: i as u32 + 1,
                title: title.to_string(),
                poster_path: None,
                premiere_date: None,
            })
            .collect();
        Catalog::new(CatalogKind::Movie, items, SimilarityMatrix::from_rows(rows).unwrap()).unwrap()
    }

    #[test]
    fn test_duplicate_and_self_titles_are_skipped() {
        let catalog = build_catalog(
            &["Alpha", "Alpha", "Beta"],
            vec![
                vec![1.0, 0.9, 0.5],
                vec![0.9, 1.0, 0.4],
                vec![0.5, 0.4, 1.0],
            ],
        );

        let ranked = rank(&catalog, 0, "Alpha", 5).unwrap();

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].item.id, 3);
        assert_eq!(ranked[0].item.title, "Beta");
    }

    #[test]
    fn test_first_sorted_entry_is_dropped_even_if_not_seed() {
        // Row 0's maximum is index 2, not the diagonal
        let catalog = build_catalog(
            &["Seed", "Near", "Nearest"],
            vec![
                vec![0.5, 0.7, 0.9],
                vec![0.7, 1.0, 0.1],
                vec![0.9, 0.1, 1.0],
            ],
        );

        let ranked = rank(&catalog, 0, "Seed", 10).unwrap();
        let titles: Vec<&str> = ranked.iter().map(|r| r.item.title.as_str()).collect();

        // "Nearest" is dropped positionally, "Seed" by title
        assert_eq!(titles, vec!["Near"]);
    }

    #[test]
    fn test_ties_break_by_ascending_index() {
        let catalog = build_catalog(
            &["Seed", "A", "B", "C"],
            vec![
                vec![1.0, 0.5, 0.8, 0.5],
                vec![0.5, 1.0, 0.0, 0.0],
                vec![0.8, 0.0, 1.0, 0.0],
                vec![0.5, 0.0, 0.0, 1.0],
            ],
        );

        let ranked = rank(&catalog, 0, "Seed", 10).unwrap();
        let indices: Vec<usize> = ranked.iter().map(|r| r.index).collect();

        assert_eq!(indices, vec![2, 1, 3]);
    }

    #[test]
    fn test_invalid_seed_index() {
        let catalog = build_catalog(&["Only"], vec![vec![1.0]]);

        let err = rank(&catalog, 1, "Only", 5).unwrap_err();
        assert_eq!(err, RankError::InvalidSeedIndex { index: 1, size: 1 });
    }

    #[test]
    fn test_zero_limit_and_single_item_catalog() {
        let catalog = build_catalog(&["Only"], vec![vec![1.0]]);

        assert!(rank(&catalog, 0, "Only", 0).unwrap().is_empty());
        assert!(rank(&catalog, 0, "Only", 5).unwrap().is_empty());
    }

    #[test]
    fn test_bare_ranker_keeps_duplicates() {
        let catalog = build_catalog(
            &["Alpha", "Alpha", "Beta"],
            vec![
                vec![1.0, 0.9, 0.5],
                vec![0.9, 1.0, 0.4],
                vec![0.5, 0.4, 1.0],
            ],
        );

        let ranked = SimilarityRanker::bare().rank(&catalog, 0, "Alpha", 5).unwrap();
        assert_eq!(ranked.len(), 2);
        assert!(SimilarityRanker::bare().filter_names().is_empty());
        assert_eq!(
            SimilarityRanker::new().filter_names(),
            vec!["SelfTitleFilter", "DuplicateTitleFilter"]
        );
    }
}
