//! # Catalog Crate
//!
//! Holds the movie and TV catalogs used by the recommender and loads them
//! from precomputed artifacts.
//!
//! ## Main Components
//!
//! - **types**: `CatalogItem`, `SimilarityMatrix`, `Catalog`, `CatalogSet`
//! - **parser**: Parse item (JSON) and similarity (text) artifacts
//! - **index**: Load both catalogs in parallel and validate alignment
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogKind, CatalogSet};
//! use std::path::Path;
//!
//! let catalogs = CatalogSet::load_from_dir(Path::new("model"))?;
//! let movies = catalogs.get(CatalogKind::Movie);
//!
//! let index = movies.index_of_title("Avatar").unwrap();
//! let row = movies.similarity_row(index).unwrap();
//! println!("{} has {} similarity scores", movies.items()[index].title, row.len());
//! ```
//!
//! ## Alignment
//!
//! Item position is the join key into the similarity matrix. `Catalog::new`
//! refuses a matrix whose dimension differs from the item count, and the
//! parser refuses a matrix that is not square, so a loaded catalog is
//! always aligned.

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{CatalogLoadError, Result};
pub use types::{
    ItemId,
    CatalogKind,
    CatalogItem,
    SimilarityMatrix,
    Catalog,
    CatalogSet,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: ItemId, title: &str) -> CatalogItem {
        CatalogItem {
            id,
            title: title.to_string(),
            poster_path: None,
            premiere_date: None,
        }
    }

    fn identity(n: usize) -> SimilarityMatrix {
        let rows = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        SimilarityMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new(
            CatalogKind::Movie,
            vec![item(1, "Alpha"), item(2, "Beta")],
            identity(2),
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.kind(), CatalogKind::Movie);
        assert_eq!(catalog.titles().collect::<Vec<_>>(), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_catalog_rejects_misaligned_matrix() {
        let result = Catalog::new(CatalogKind::Tv, vec![item(1, "Alpha")], identity(2));

        assert!(matches!(
            result,
            Err(CatalogLoadError::LoadMismatch { items: 1, dimension: 2, .. })
        ));
    }

    #[test]
    fn test_matrix_rejects_ragged_rows() {
        let result = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5]]);
        assert!(matches!(result, Err(CatalogLoadError::NonSquareMatrix { .. })));
    }

    #[test]
    fn test_lookups_use_first_occurrence() {
        let catalog = Catalog::new(
            CatalogKind::Movie,
            vec![item(7, "Alpha"), item(8, "Alpha"), item(7, "Beta")],
            identity(3),
        )
        .unwrap();

        assert_eq!(catalog.index_of_title("Alpha"), Some(0));
        assert_eq!(catalog.index_of_title("Beta"), Some(2));
        assert_eq!(catalog.index_of_title("alpha"), None);
        assert_eq!(catalog.index_of_id(7), Some(0));
        assert_eq!(catalog.index_of_id(8), Some(1));
        assert_eq!(catalog.index_of_id(9), None);
    }

    #[test]
    fn test_empty_queries() {
        let catalog = Catalog::new(CatalogKind::Tv, vec![], identity(0)).unwrap();

        assert!(catalog.is_empty());
        assert!(catalog.item(0).is_none());
        assert!(catalog.similarity_row(0).is_none());
        assert!(catalog.index_of_title("Anything").is_none());
    }

    #[test]
    fn test_catalog_kind_parsing() {
        assert_eq!(" Movie ".parse::<CatalogKind>().unwrap(), CatalogKind::Movie);
        assert_eq!("tv".parse::<CatalogKind>().unwrap(), CatalogKind::Tv);
        assert!("anime".parse::<CatalogKind>().is_err());
        assert_eq!(CatalogKind::Tv.to_string(), "tv");
    }

    #[test]
    fn test_catalog_set_checks_kinds() {
        let movies = Catalog::new(CatalogKind::Movie, vec![], identity(0)).unwrap();
        let also_movies = Catalog::new(CatalogKind::Movie, vec![], identity(0)).unwrap();

        assert!(CatalogSet::new(movies, also_movies).is_err());
    }
}
