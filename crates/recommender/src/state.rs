//! Process-wide catalog state.
//!
//! The catalogs are loaded once during start-up and installed here before
//! any request handler can run. After that they are only ever read, so
//! handlers share them through `Arc` without locking. There is no reload
//! and no teardown.

use anyhow::{anyhow, Context, Result};
use catalog::CatalogSet;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::info;

static CATALOGS: OnceLock<Arc<CatalogSet>> = OnceLock::new();

/// Install the catalogs. Fails if they were already installed.
pub fn init_catalogs(catalogs: CatalogSet) -> Result<Arc<CatalogSet>> {
    let catalogs = Arc::new(catalogs);
    CATALOGS
        .set(Arc::clone(&catalogs))
        .map_err(|_| anyhow!("Catalogs are already initialized"))?;

    let (movies, tv) = catalogs.counts();
    info!("Installed process catalogs: {} movies, {} tv shows", movies, tv);
    Ok(catalogs)
}

/// Load the catalogs from `artifact_dir` and install them.
pub fn load_catalogs(artifact_dir: &Path) -> Result<Arc<CatalogSet>> {
    let catalogs = CatalogSet::load_from_dir(artifact_dir)
        .with_context(|| format!("Failed to load catalogs from {}", artifact_dir.display()))?;
    init_catalogs(catalogs)
}

/// The installed catalogs, or an error if start-up has not installed them
pub fn catalogs() -> Result<Arc<CatalogSet>> {
    CATALOGS
        .get()
        .cloned()
        .ok_or_else(|| anyhow!("Catalogs have not been initialized"))
}

pub fn is_initialized() -> bool {
    CATALOGS.get().is_some()
}
