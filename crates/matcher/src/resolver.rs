//! Fuzzy Resolver - map a free-text query to a catalog title
//!
//! ## Algorithm
//! 1. Reject blank queries
//! 2. Scan candidate titles in order, scoring each against the query
//! 3. A candidate identical to the query wins immediately
//! 4. Otherwise keep the first candidate with the highest score
//! 5. Report no match when that score is below the cutoff
//!
//! A query with no letters or digits (e.g. "?") can only match a title
//! spelled exactly the same way.
//!
//! The resolver only reports the title string back. Turning it into a
//! catalog position is the caller's job (first occurrence wins).

use crate::scorer;
use tracing::{debug, instrument};

/// Default minimum score for a match, on the 0-100 scale
pub const DEFAULT_CUTOFF: f64 = 60.0;

/// Best match for a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleMatch<'a> {
    /// The candidate title exactly as it appears in the input
    pub title: &'a str,
    /// Score on the 0-100 scale
    pub score: f64,
}

/// Resolves free-text queries against an ordered list of titles
#[derive(Debug, Clone, Copy)]
pub struct FuzzyResolver {
    /// Minimum score (0-100) a candidate needs to count as a match
    cutoff: f64,
}

impl FuzzyResolver {
    /// Create a resolver with the default cutoff of 60
    pub fn new() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
        }
    }

    /// Configure the cutoff (default: 60, clamped to 0-100)
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff.clamp(0.0, 100.0);
        self
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Find the best matching title, or `None` if nothing reaches the cutoff.
    ///
    /// Ties on score go to the candidate seen first.
    #[instrument(skip(self, titles), fields(cutoff = self.cutoff))]
    pub fn resolve<'a, I>(&self, query: &str, titles: I) -> Option<TitleMatch<'a>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if query.trim().is_empty() {
            debug!("Blank query");
            return None;
        }
        let processed_query = scorer::preprocess(query);
        let exact_only = processed_query.is_empty();

        let mut best: Option<TitleMatch<'a>> = None;
        let mut scanned = 0usize;

        for title in titles {
            scanned += 1;

            if title == query {
                best = Some(TitleMatch { title, score: 100.0 });
                break;
            }
            if exact_only {
                continue;
            }

            let score = scorer::weighted_ratio(&processed_query, &scorer::preprocess(title));
            if best.is_none_or(|b| score > b.score) {
                best = Some(TitleMatch { title, score });
            }
        }

        match best {
            Some(found) if found.score >= self.cutoff => {
                debug!(
                    "Resolved to {:?} (score {:.1}, scanned {})",
                    found.title, found.score, scanned
                );
                Some(found)
            }
            Some(found) => {
                debug!(
                    "Best candidate {:?} scored {:.1}, below cutoff",
                    found.title, found.score
                );
                None
            }
            None if exact_only => {
                debug!("No title spelled exactly {:?} (scanned {})", query, scanned);
                None
            }
            None => {
                debug!("No candidates to match against");
                None
            }
        }
    }
}

impl Default for FuzzyResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve `query` against `titles` with an explicit cutoff.
///
/// Shorthand for `FuzzyResolver::new().with_cutoff(cutoff).resolve(..)`
/// that returns only the matched title.
pub fn resolve<'a, I>(query: &str, titles: I, cutoff: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    FuzzyResolver::new()
        .with_cutoff(cutoff)
        .resolve(query, titles)
        .map(|m| m.title)
}
