use anyhow::{bail, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable prefix for every setting
pub const ENV_PREFIX: &str = "RECS_";

/// Recommender configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RecommenderConfig {
    /// Directory holding the catalog artifacts
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,

    /// Minimum fuzzy score (0-100) for a title match
    #[serde(default = "default_match_cutoff")]
    pub match_cutoff: f64,

    /// Items in a standalone recommendation list
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// Items in a detail page "similar" panel
    #[serde(default = "default_panel_limit")]
    pub panel_limit: usize,
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("model")
}

fn default_match_cutoff() -> f64 {
    matcher::DEFAULT_CUTOFF
}

fn default_list_limit() -> usize {
    ranker::LIST_LIMIT
}

fn default_panel_limit() -> usize {
    ranker::PANEL_LIMIT
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            artifact_dir: default_artifact_dir(),
            match_cutoff: default_match_cutoff(),
            list_limit: default_list_limit(),
            panel_limit: default_panel_limit(),
        }
    }
}

impl RecommenderConfig {
    /// Load configuration from `RECS_*` environment variables (and `.env`)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<RecommenderConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from explicit key/value pairs (keys carry the prefix)
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::prefixed(ENV_PREFIX)
            .from_iter::<_, RecommenderConfig>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.match_cutoff) {
            bail!("match_cutoff must be within 0-100, got {}", self.match_cutoff);
        }
        if self.list_limit == 0 {
            bail!("list_limit must be greater than zero");
        }
        if self.panel_limit == 0 {
            bail!("panel_limit must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = RecommenderConfig::from_vars(vars(&[])).unwrap();

        assert_eq!(config, RecommenderConfig::default());
        assert_eq!(config.artifact_dir, PathBuf::from("model"));
        assert_eq!(config.match_cutoff, 60.0);
        assert_eq!(config.list_limit, 30);
        assert_eq!(config.panel_limit, 6);
    }

    #[test]
    fn test_overrides() {
        let config = RecommenderConfig::from_vars(vars(&[
            ("RECS_ARTIFACT_DIR", "/srv/artifacts"),
            ("RECS_MATCH_CUTOFF", "75.5"),
            ("RECS_LIST_LIMIT", "12"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.artifact_dir, PathBuf::from("/srv/artifacts"));
        assert_eq!(config.match_cutoff, 75.5);
        assert_eq!(config.list_limit, 12);
        assert_eq!(config.panel_limit, 6);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(RecommenderConfig::from_vars(vars(&[("RECS_MATCH_CUTOFF", "140")])).is_err());
        assert!(RecommenderConfig::from_vars(vars(&[("RECS_PANEL_LIMIT", "0")])).is_err());
        assert!(RecommenderConfig::from_vars(vars(&[("RECS_LIST_LIMIT", "many")])).is_err());
    }
}
