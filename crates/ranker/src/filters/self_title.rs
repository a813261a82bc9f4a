//! Filter to remove candidates that carry the seed's own title.
//!
//! The ranker already drops the top sorted entry, but the seed is not
//! guaranteed to be that entry, and the catalog may hold other records with
//! the same title.

use crate::traits::{RankFilter, RankedItem, Seed};

/// Removes candidates whose title equals the seed title.
pub struct SelfTitleFilter;

impl RankFilter for SelfTitleFilter {
    fn name(&self) -> &str {
        "SelfTitleFilter"
    }

    fn apply<'a>(&self, candidates: Vec<RankedItem<'a>>, seed: &Seed<'_>) -> Vec<RankedItem<'a>> {
        candidates
            .into_iter()
            .filter(|candidate| candidate.item.title != seed.title)
            .collect()
    }
}
