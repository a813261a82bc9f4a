//! # Matcher Crate
//!
//! Fuzzy title resolution: maps a free-text query (typos, partial titles,
//! shuffled words) to the closest title in a catalog.
//!
//! ## Components
//!
//! ### Scorer
//! Scores two strings on a 0-100 scale. Case and punctuation are ignored and
//! the score is the best of a whole-string, a word-order tolerant and a
//! partial (substring) comparison.
//!
//! ### FuzzyResolver
//! Scans an ordered list of titles and reports the best one if it reaches
//! the cutoff (60 by default).
//!
//! ## Example Usage
//!
//! ```ignore
//! use matcher::FuzzyResolver;
//!
//! let titles = ["The Avengers", "Avengers", "Avatar"];
//! let resolver = FuzzyResolver::new();
//!
//! let found = resolver.resolve("Avngers", titles).unwrap();
//! assert_eq!(found.title, "Avengers");
//! ```

pub mod scorer;
pub mod resolver;

pub use resolver::{resolve, FuzzyResolver, TitleMatch, DEFAULT_CUTOFF};
