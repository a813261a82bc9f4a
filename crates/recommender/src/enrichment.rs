//! Seam for external metadata (cast, trailers, streaming providers).
//!
//! The recommender never interprets this data. It forwards whatever the
//! provider returns, keyed by the item id, and keeps ranking independent of
//! whether the provider succeeds.

use anyhow::Result;
use catalog::{CatalogItem, CatalogKind, ItemId};
use serde::Serialize;
use serde_json::Value;

/// Source of opaque per-item metadata
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Metadata for item `id`, or `None` if the provider has nothing for it.
    async fn fetch(&self, kind: CatalogKind, id: ItemId) -> Result<Option<Value>>;
}

/// Provider that never has metadata
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

#[async_trait::async_trait]
impl MetadataProvider for NoMetadata {
    async fn fetch(&self, _kind: CatalogKind, _id: ItemId) -> Result<Option<Value>> {
        Ok(None)
    }
}

/// Everything a detail page needs from the core
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub kind: CatalogKind,
    pub id: ItemId,
    /// The catalog record, when the id is part of the catalog
    pub item: Option<CatalogItem>,
    /// Provider payload, passed through untouched
    pub metadata: Option<Value>,
    /// "You might also like" panel
    pub similar: Vec<CatalogItem>,
}

/// Title carried by a provider payload, if any
pub(crate) fn metadata_title(kind: CatalogKind, metadata: &Value) -> Option<&str> {
    metadata
        .get(kind.title_field())
        .or_else(|| metadata.get("title"))
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_title_prefers_kind_field() {
        let tv = json!({"name": "Dark", "title": "Ignored"});
        assert_eq!(metadata_title(CatalogKind::Tv, &tv), Some("Dark"));

        let tv_without_name = json!({"title": "Dark"});
        assert_eq!(metadata_title(CatalogKind::Tv, &tv_without_name), Some("Dark"));

        let blank = json!({"title": "  "});
        assert_eq!(metadata_title(CatalogKind::Movie, &blank), None);
    }
}
