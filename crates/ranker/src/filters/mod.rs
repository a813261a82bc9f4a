//! Filter implementations for the ranking stage.
//!
//! The default ranker applies `SelfTitleFilter` then `DuplicateTitleFilter`.

pub mod self_title;
pub mod duplicate_title;

// Re-export for convenience
pub use self_title::SelfTitleFilter;
pub use duplicate_title::DuplicateTitleFilter;
