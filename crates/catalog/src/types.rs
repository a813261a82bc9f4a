//! Core domain types for the title catalogs.
//!
//! A catalog is an ordered list of items plus a square similarity matrix
//! whose rows and columns follow that same order. The position of an item
//! is its identity inside the catalog and the key into the matrix.

use crate::error::{CatalogLoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// External identifier of a movie or show (TMDB id)
pub type ItemId = u32;

// =============================================================================
// Catalog Kind
// =============================================================================

/// The two catalogs that exist side by side. They are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Movie,
    Tv,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 2] = [CatalogKind::Movie, CatalogKind::Tv];

    /// Record field that holds the display title for this kind
    pub fn title_field(self) -> &'static str {
        match self {
            CatalogKind::Movie => "title",
            CatalogKind::Tv => "name",
        }
    }

    /// File name of the item artifact
    pub fn items_file(self) -> &'static str {
        match self {
            CatalogKind::Movie => "tmdb_movies.json",
            CatalogKind::Tv => "tmdb_tv_series.json",
        }
    }

    /// File name of the similarity artifact
    pub fn similarity_file(self) -> &'static str {
        match self {
            CatalogKind::Movie => "tmdb_similarity.txt",
            CatalogKind::Tv => "tmdb_tv_similarity.txt",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::Movie => f.write_str("movie"),
            CatalogKind::Tv => f.write_str("tv"),
        }
    }
}

impl FromStr for CatalogKind {
    type Err = CatalogLoadError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(CatalogKind::Movie),
            "tv" => Ok(CatalogKind::Tv),
            _ => Err(CatalogLoadError::InvalidValue {
                field: "catalog kind".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A movie or show as loaded from the item artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    /// `title` for movies, `name` for TV shows
    pub title: String,
    pub poster_path: Option<String>,
    /// `release_date` for movies, `first_air_date` for TV shows
    pub premiere_date: Option<String>,
}

impl CatalogItem {
    /// Year prefix of the premiere date, e.g. "2012-04-25" -> "2012"
    pub fn year(&self) -> Option<&str> {
        let date = self.premiere_date.as_deref()?;
        date.get(..4).filter(|y| y.chars().all(|c| c.is_ascii_digit()))
    }
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Square matrix of precomputed pairwise similarity scores, row-major.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    dimension: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from rows, checking that it is square and finite.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dimension = rows.len();
        let mut scores = Vec::with_capacity(dimension * dimension);

        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != dimension {
                return Err(CatalogLoadError::NonSquareMatrix {
                    file: "<memory>".to_string(),
                    line: idx + 1,
                    expected: dimension,
                    found: row.len(),
                });
            }
            if let Some(bad) = row.iter().find(|v| !v.is_finite()) {
                return Err(CatalogLoadError::InvalidValue {
                    field: "similarity score".to_string(),
                    value: bad.to_string(),
                });
            }
            scores.extend(row);
        }

        Ok(Self { dimension, scores })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Row `index`, or `None` when out of range
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.dimension {
            return None;
        }
        let start = index * self.dimension;
        Some(&self.scores[start..start + self.dimension])
    }

    /// Score of item `i` against item `j`
    pub fn score(&self, i: usize, j: usize) -> Option<f32> {
        self.row(i)?.get(j).copied()
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// One catalog: ordered items and the aligned similarity matrix.
///
/// Immutable once constructed. Lookups by title or id return the first
/// matching position, so duplicate titles or ids resolve deterministically.
#[derive(Debug)]
pub struct Catalog {
    kind: CatalogKind,
    items: Vec<CatalogItem>,
    similarity: SimilarityMatrix,
    id_index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Pair items with their similarity matrix.
    ///
    /// Fails with [`CatalogLoadError::LoadMismatch`] when the matrix
    /// dimension differs from the item count.
    pub fn new(
        kind: CatalogKind,
        items: Vec<CatalogItem>,
        similarity: SimilarityMatrix,
    ) -> Result<Self> {
        if items.len() != similarity.dimension() {
            return Err(CatalogLoadError::LoadMismatch {
                catalog: kind.to_string(),
                items: items.len(),
                dimension: similarity.dimension(),
            });
        }

        let mut id_index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            id_index.entry(item.id).or_insert(position);
        }

        Ok(Self {
            kind,
            items,
            similarity,
            id_index,
        })
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }

    /// Titles in catalog order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.title.as_str())
    }

    /// First position whose title equals `title` exactly
    pub fn index_of_title(&self, title: &str) -> Option<usize> {
        self.items.iter().position(|item| item.title == title)
    }

    /// First position holding item `id`
    pub fn index_of_id(&self, id: ItemId) -> Option<usize> {
        self.id_index.get(&id).copied()
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Similarity row of the item at `index`
    pub fn similarity_row(&self, index: usize) -> Option<&[f32]> {
        self.similarity.row(index)
    }
}

// =============================================================================
// CatalogSet
// =============================================================================

/// Both catalogs, loaded together at start-up.
#[derive(Debug)]
pub struct CatalogSet {
    pub(crate) movies: Catalog,
    pub(crate) tv: Catalog,
}

impl CatalogSet {
    /// Assemble a set from two catalogs of the right kinds
    pub fn new(movies: Catalog, tv: Catalog) -> Result<Self> {
        for (expected, catalog) in [(CatalogKind::Movie, &movies), (CatalogKind::Tv, &tv)] {
            if catalog.kind() != expected {
                return Err(CatalogLoadError::InvalidValue {
                    field: format!("{} catalog kind", expected),
                    value: catalog.kind().to_string(),
                });
            }
        }
        Ok(Self { movies, tv })
    }

    pub fn get(&self, kind: CatalogKind) -> &Catalog {
        match kind {
            CatalogKind::Movie => &self.movies,
            CatalogKind::Tv => &self.tv,
        }
    }

    pub fn movies(&self) -> &Catalog {
        &self.movies
    }

    pub fn tv(&self) -> &Catalog {
        &self.tv
    }

    /// Item counts for logging: (movies, tv)
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.tv.len())
    }
}
