//! Parsers for the precomputed catalog artifacts.
//!
//! - `<kind>.json`: JSON array of item records (`id`, `title`/`name`,
//!   `poster_path`, `release_date`/`first_air_date`, extra fields ignored)
//! - `<kind>_similarity.txt`: one matrix row per line, scores separated by
//!   commas and/or whitespace

use crate::error::{CatalogLoadError, Result};
use crate::types::*;
use rayon::prelude::*;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/// Item record as exported by the precomputation step
#[derive(Debug, Deserialize)]
struct RawRecord {
    id: ItemId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    first_air_date: Option<String>,
}

impl RawRecord {
    /// Convert into a catalog item, picking the title field for `kind`.
    ///
    /// TV exports sometimes carry `title` instead of `name`; that column is
    /// used when `name` is absent.
    fn into_item(self, kind: CatalogKind, file: &str, position: usize) -> Result<CatalogItem> {
        let (title, date) = match kind {
            CatalogKind::Movie => (self.title, self.release_date),
            CatalogKind::Tv => (self.name.or(self.title), self.first_air_date),
        };

        let title = title.ok_or_else(|| CatalogLoadError::MissingField {
            file: file.to_string(),
            position,
            field: kind.title_field().to_string(),
        })?;

        Ok(CatalogItem {
            id: self.id,
            title,
            poster_path: self.poster_path.filter(|p| !p.is_empty()),
            premiere_date: date.filter(|d| !d.is_empty()),
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CatalogLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogLoadError::IoError(e),
    })
}

/// Parse an item artifact into catalog order
pub fn parse_items(path: &Path, kind: CatalogKind) -> Result<Vec<CatalogItem>> {
    let file = file_name(path);
    let content = read_to_string(path)?;
    parse_items_str(&content, kind, &file)
}

pub(crate) fn parse_items_str(content: &str, kind: CatalogKind, file: &str) -> Result<Vec<CatalogItem>> {
    let records: Vec<RawRecord> =
        serde_json::from_str(content).map_err(|source| CatalogLoadError::JsonError {
            file: file.to_string(),
            source,
        })?;

    records
        .into_iter()
        .enumerate()
        .map(|(position, record)| record.into_item(kind, file, position))
        .collect()
}

/// Parse a similarity artifact into a square matrix
pub fn parse_similarity(path: &Path) -> Result<SimilarityMatrix> {
    let file = file_name(path);
    let content = read_to_string(path)?;
    parse_similarity_str(&content, &file)
}

pub(crate) fn parse_similarity_str(content: &str, file: &str) -> Result<SimilarityMatrix> {
    // Keep original line numbers for error messages
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let rows: Vec<Vec<f32>> = lines
        .par_iter()
        .map(|&(line_no, line)| parse_row(line, line_no, file))
        .collect::<Result<_>>()?;

    let dimension = rows.len();
    if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != dimension) {
        return Err(CatalogLoadError::NonSquareMatrix {
            file: file.to_string(),
            line: lines[idx].0,
            expected: dimension,
            found: row.len(),
        });
    }

    SimilarityMatrix::from_rows(rows)
}

fn parse_row(line: &str, line_no: usize, file: &str) -> Result<Vec<f32>> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|field| !field.is_empty())
        .map(|field| {
            let value: f32 = field.parse().map_err(|e| CatalogLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Invalid score {:?}: {}", field, e),
            })?;
            if !value.is_finite() {
                return Err(CatalogLoadError::ParseError {
                    file: file.to_string(),
                    line: line_no,
                    reason: format!("Non-finite score {:?}", field),
                });
            }
            Ok(value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movie_items() {
        let json = r#"[
            {"id": 19995, "title": "Avatar", "poster_path": "/avatar.jpg", "release_date": "2009-12-10", "genres": "Action"},
            {"id": 285, "title": "Pirates of the Caribbean", "poster_path": null}
        ]"#;

        let items = parse_items_str(json, CatalogKind::Movie, "movies.json").unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 19995);
        assert_eq!(items[0].title, "Avatar");
        assert_eq!(items[0].poster_path.as_deref(), Some("/avatar.jpg"));
        assert_eq!(items[0].year(), Some("2009"));
        assert_eq!(items[1].poster_path, None);
        assert_eq!(items[1].premiere_date, None);
    }

    #[test]
    fn test_tv_items_fall_back_to_title_column() {
        let json = r#"[
            {"id": 1399, "name": "Game of Thrones", "first_air_date": "2011-04-17"},
            {"id": 66732, "title": "Stranger Things"}
        ]"#;

        let items = parse_items_str(json, CatalogKind::Tv, "tv.json").unwrap();

        assert_eq!(items[0].title, "Game of Thrones");
        assert_eq!(items[0].year(), Some("2011"));
        assert_eq!(items[1].title, "Stranger Things");
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let json = r#"[{"id": 1, "title": "Ok"}, {"id": 2, "poster_path": "/x.jpg"}]"#;

        let err = parse_items_str(json, CatalogKind::Movie, "movies.json").unwrap_err();
        assert!(matches!(
            err,
            CatalogLoadError::MissingField { position: 1, .. }
        ));
    }

    #[test]
    fn test_parse_similarity_mixed_separators() {
        let text = "1.0, 0.2 0.3\n\n0.2,1.0,0.4\n0.3 0.4 1.0\n";

        let matrix = parse_similarity_str(text, "sim.txt").unwrap();

        assert_eq!(matrix.dimension(), 3);
        assert_eq!(matrix.row(1), Some(&[0.2, 1.0, 0.4][..]));
        assert_eq!(matrix.score(2, 0), Some(0.3));
    }

    #[test]
    fn test_parse_similarity_reports_line() {
        let text = "1.0 0.5\n0.5 abc\n";

        let err = parse_similarity_str(text, "sim.txt").unwrap_err();
        assert!(matches!(err, CatalogLoadError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_non_square_similarity_is_rejected() {
        let text = "1.0 0.5\n0.5 1.0 0.2\n";

        let err = parse_similarity_str(text, "sim.txt").unwrap_err();
        assert!(matches!(
            err,
            CatalogLoadError::NonSquareMatrix { line: 2, expected: 2, found: 3, .. }
        ));
    }

    #[test]
    fn test_nan_score_is_rejected() {
        let err = parse_similarity_str("NaN", "sim.txt").unwrap_err();
        assert!(matches!(err, CatalogLoadError::ParseError { line: 1, .. }));
    }
}
