//! # Recommendation Facade
//!
//! Coordinates the two core stages for one catalog at a time:
//! 1. Resolve the free-text query to a catalog title (fuzzy, cutoff 60)
//! 2. Map the title to its first catalog position
//! 3. Rank the catalog against that position
//! 4. Package the matched item and its recommendations
//!
//! Everything here is a pure read of the shared catalogs. "No match" is a
//! normal result, not an error; errors only signal broken wiring.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use catalog::{Catalog, CatalogItem, CatalogKind, CatalogSet, ItemId};
use matcher::{FuzzyResolver, TitleMatch};
use ranker::SimilarityRanker;

use crate::config::RecommenderConfig;
use crate::enrichment::{metadata_title, DetailView, MetadataProvider};
use crate::state;

/// Result of a title query against one catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub kind: CatalogKind,
    pub query: String,
    /// The catalog item the query resolved to
    pub matched: Option<CatalogItem>,
    /// Most similar items first
    pub items: Vec<CatalogItem>,
}

impl Recommendation {
    fn not_found(kind: CatalogKind, query: &str) -> Self {
        Self {
            kind,
            query: query.to_string(),
            matched: None,
            items: Vec::new(),
        }
    }

    pub fn is_match(&self) -> bool {
        self.matched.is_some()
    }
}

/// Outcome of an unvalidated request, ready to show to a user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendOutcome {
    Found(Recommendation),
    NotFound { message: String },
}

/// Entry point for recommendation requests
#[derive(Clone)]
pub struct RecommendationFacade {
    catalogs: Arc<CatalogSet>,
    resolver: FuzzyResolver,
    ranker: Arc<SimilarityRanker>,
    list_limit: usize,
    panel_limit: usize,
}

impl RecommendationFacade {
    /// Create a facade over already loaded catalogs
    pub fn new(catalogs: Arc<CatalogSet>, config: &RecommenderConfig) -> Self {
        Self {
            catalogs,
            resolver: FuzzyResolver::new().with_cutoff(config.match_cutoff),
            ranker: Arc::new(SimilarityRanker::new()),
            list_limit: config.list_limit,
            panel_limit: config.panel_limit,
        }
    }

    /// Create a facade over the process-wide catalogs
    pub fn from_global(config: &RecommenderConfig) -> Result<Self> {
        let catalogs = state::catalogs().context("Recommender used before start-up")?;
        Ok(Self::new(catalogs, config))
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    /// Fuzzy-resolve `query` against the titles of one catalog
    pub fn resolve(&self, kind: CatalogKind, query: &str) -> Option<TitleMatch<'_>> {
        self.resolver.resolve(query, self.catalogs.get(kind).titles())
    }

    /// Recommendations for a free-text title, list sized
    pub fn recommend(&self, kind: CatalogKind, query: &str) -> Result<Recommendation> {
        self.recommend_with_limit(kind, query, self.list_limit)
    }

    pub fn recommend_movies(&self, query: &str) -> Result<Recommendation> {
        self.recommend(CatalogKind::Movie, query)
    }

    pub fn recommend_tv(&self, query: &str) -> Result<Recommendation> {
        self.recommend(CatalogKind::Tv, query)
    }

    /// Recommendations for a free-text title with an explicit limit
    #[instrument(skip(self))]
    pub fn recommend_with_limit(
        &self,
        kind: CatalogKind,
        query: &str,
        limit: usize,
    ) -> Result<Recommendation> {
        let start = Instant::now();
        let catalog = self.catalogs.get(kind);

        let Some(found) = self.resolver.resolve(query, catalog.titles()) else {
            info!("No {} found for query {:?}", kind, query);
            return Ok(Recommendation::not_found(kind, query));
        };

        let seed_index = catalog
            .index_of_title(found.title)
            .with_context(|| format!("Resolved title {:?} is missing from the {} catalog", found.title, kind))?;
        let items = self.rank_items(catalog, seed_index, found.title, limit)?;

        info!(
            "Resolved {:?} to {:?} (score {:.1}), {} recommendations in {:.2?}",
            query,
            found.title,
            found.score,
            items.len(),
            start.elapsed()
        );

        Ok(Recommendation {
            kind,
            query: query.to_string(),
            matched: catalog.item(seed_index).cloned(),
            items,
        })
    }

    /// "Similar" panel for an item known by id; skips fuzzy resolution.
    ///
    /// Returns `None` when the id is not in the catalog.
    #[instrument(skip(self))]
    pub fn similar_by_id(&self, kind: CatalogKind, id: ItemId) -> Result<Option<Vec<CatalogItem>>> {
        let catalog = self.catalogs.get(kind);
        let Some(seed_index) = catalog.index_of_id(id) else {
            debug!("{} {} is not in the catalog", kind, id);
            return Ok(None);
        };

        let seed_title = &catalog.items()[seed_index].title;
        let items = self.rank_items(catalog, seed_index, seed_title, self.panel_limit)?;
        Ok(Some(items))
    }

    /// "Similar" panel for an item known only by an external title
    #[instrument(skip(self))]
    pub fn similar_by_title(&self, kind: CatalogKind, title: &str) -> Result<Vec<CatalogItem>> {
        let recommendation = self.recommend_with_limit(kind, title, self.panel_limit)?;
        Ok(recommendation.items)
    }

    /// Handle a raw request: validate the inputs and turn every user-facing
    /// failure into a `NotFound` message.
    pub fn recommend_request(&self, content_type: &str, query: &str) -> Result<RecommendOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(RecommendOutcome::NotFound {
                message: "Please enter a title to search".to_string(),
            });
        }

        let Ok(kind) = content_type.parse::<CatalogKind>() else {
            warn!("Invalid content type {:?}", content_type);
            return Ok(RecommendOutcome::NotFound {
                message: "Invalid content type specified".to_string(),
            });
        };

        let recommendation = self.recommend(kind, query)?;
        if !recommendation.is_match() {
            return Ok(RecommendOutcome::NotFound {
                message: format!("No {} found with that name", kind),
            });
        }
        Ok(RecommendOutcome::Found(recommendation))
    }

    /// Assemble a detail view: catalog record, provider metadata and the
    /// "similar" panel.
    ///
    /// The panel is computed from catalog state first. Provider failures are
    /// logged and leave `metadata` empty. When the id is unknown to the
    /// catalog, the panel falls back to the title found in the metadata.
    pub async fn detail<P: MetadataProvider + ?Sized>(
        &self,
        kind: CatalogKind,
        id: ItemId,
        provider: &P,
    ) -> Result<DetailView> {
        let catalog = self.catalogs.get(kind);
        let item = catalog.index_of_id(id).and_then(|i| catalog.item(i)).cloned();
        let panel = self.similar_by_id(kind, id)?;

        let metadata = match provider.fetch(kind, id).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Metadata lookup failed for {} {}: {:#}", kind, id, e);
                None
            }
        };

        let similar = match panel {
            Some(items) => items,
            None => match metadata.as_ref().and_then(|m| metadata_title(kind, m)) {
                Some(title) => self.similar_by_title(kind, title)?,
                None => Vec::new(),
            },
        };

        Ok(DetailView {
            kind,
            id,
            item,
            metadata,
            similar,
        })
    }

    fn rank_items(
        &self,
        catalog: &Catalog,
        seed_index: usize,
        self_title: &str,
        limit: usize,
    ) -> Result<Vec<CatalogItem>> {
        let ranked = self
            .ranker
            .rank(catalog, seed_index, self_title, limit)
            .with_context(|| format!("Failed to rank the {} catalog", catalog.kind()))?;
        Ok(ranked.into_iter().map(|r| r.item.clone()).collect())
    }
}
