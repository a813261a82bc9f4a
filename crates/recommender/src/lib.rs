//! Recommender crate for the ReelRecs title recommender.
//!
//! This crate ties the catalogs, the fuzzy title resolver and the similarity
//! ranker together behind `RecommendationFacade`, and owns the process-wide
//! catalog state and the environment configuration.

pub mod config;
pub mod enrichment;
pub mod facade;
pub mod state;

pub use config::RecommenderConfig;
pub use enrichment::{DetailView, MetadataProvider, NoMetadata};
pub use facade::{RecommendOutcome, Recommendation, RecommendationFacade};
