//! Similarity ranking over a precomputed catalog.
//!
//! This crate provides:
//! - `SimilarityRanker`, which orders a catalog by similarity to a seed item
//! - The `RankFilter` trait and the standard title filters
//!
//! ## Architecture
//! Ranking runs in stages:
//! 1. The seed's similarity row is sorted (ties by ascending index)
//! 2. The top entry is dropped positionally (the seed itself by convention)
//! 3. Filters remove the seed's title and repeated titles
//! 4. The result is cut to the requested limit
//!
//! ## Example Usage
//! ```ignore
//! use ranker::SimilarityRanker;
//!
//! let ranker = SimilarityRanker::new();
//! let seed = catalog.index_of_title("Avatar").unwrap();
//!
//! for ranked in ranker.rank(&catalog, seed, "Avatar", 30)? {
//!     println!("{:.3} {}", ranked.score, ranked.item.title);
//! }
//! ```

pub mod traits;
pub mod filters;
pub mod ranker;

// Re-export main types
pub use traits::{RankFilter, RankedItem, Seed};
pub use ranker::{rank, RankError, SimilarityRanker};

/// Item limit for standalone recommendation lists
pub const LIST_LIMIT: usize = 30;

/// Item limit for "similar" panels on detail pages
pub const PANEL_LIMIT: usize = 6;
