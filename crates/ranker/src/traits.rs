//! Core types and traits for the ranking stage.
//!
//! Ranking produces a score-ordered list of candidates; `RankFilter`s then
//! prune that list in sequence.

use catalog::CatalogItem;

/// A candidate read from the seed's similarity row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedItem<'a> {
    /// Position in the catalog (and column in the similarity matrix)
    pub index: usize,
    /// Similarity of this candidate to the seed
    pub score: f32,
    pub item: &'a CatalogItem,
}

/// The item recommendations are generated from
#[derive(Debug, Clone, Copy)]
pub struct Seed<'s> {
    /// Title that must never appear in the output
    pub title: &'s str,
}

/// Core trait for pruning ranked candidates.
///
/// ## Design Note
/// - Filters take ownership of the ordered candidates and must preserve
///   the relative order of what they keep
/// - `Send + Sync` so a ranker can be shared across request handlers
pub trait RankFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to candidates ordered by descending score.
    fn apply<'a>(&self, candidates: Vec<RankedItem<'a>>, seed: &Seed<'_>) -> Vec<RankedItem<'a>>;
}
