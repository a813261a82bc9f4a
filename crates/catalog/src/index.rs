//! Artifact loading for both catalogs.
//!
//! Loads every artifact file in parallel, then pairs items with their
//! similarity matrix and checks that the two are aligned.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument};

impl Catalog {
    /// Load a single catalog from an artifact directory.
    #[instrument(skip(artifact_dir), fields(dir = %artifact_dir.display()))]
    pub fn load_from_dir(artifact_dir: &Path, kind: CatalogKind) -> Result<Self> {
        let items_path = artifact_dir.join(kind.items_file());
        let similarity_path = artifact_dir.join(kind.similarity_file());

        let (items, similarity) = rayon::join(
            || parser::parse_items(&items_path, kind),
            || parser::parse_similarity(&similarity_path),
        );

        let catalog = Catalog::new(kind, items?, similarity?)?;
        info!(
            "Loaded {} catalog: {} items, {}x{} similarity matrix",
            kind,
            catalog.len(),
            catalog.similarity().dimension(),
            catalog.similarity().dimension()
        );
        Ok(catalog)
    }
}

impl CatalogSet {
    /// Load both catalogs from an artifact directory.
    ///
    /// This is the start-up entry point. Any error is fatal: the caller must
    /// not serve requests without a fully validated set.
    pub fn load_from_dir(artifact_dir: &Path) -> Result<Self> {
        info!("Loading catalog artifacts from {:?}", artifact_dir);
        let start = Instant::now();

        let (movies, tv) = rayon::join(
            || Catalog::load_from_dir(artifact_dir, CatalogKind::Movie),
            || Catalog::load_from_dir(artifact_dir, CatalogKind::Tv),
        );
        let set = CatalogSet::new(movies?, tv?)?;

        let (movie_count, tv_count) = set.counts();
        info!(
            "Catalogs ready in {:.2?}: {} movies, {} tv shows",
            start.elapsed(),
            movie_count,
            tv_count
        );
        Ok(set)
    }
}
