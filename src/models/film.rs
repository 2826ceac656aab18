//! Film catalog entries and listing query.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{AppError, AppResult};

/// Films per listing page.
pub const FILMS_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Film {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub director: String,
    pub release_year: i32,
}

/// Sortable film columns. Anything else is rejected before reaching SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilmSort {
    #[default]
    Id,
    Title,
    Director,
    ReleaseYear,
}

impl FilmSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "" | "id" => Some(FilmSort::Id),
            "title" => Some(FilmSort::Title),
            "director" => Some(FilmSort::Director),
            "release_year" => Some(FilmSort::ReleaseYear),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            FilmSort::Id => "id",
            FilmSort::Title => "title",
            FilmSort::Director => "director",
            FilmSort::ReleaseYear => "release_year",
        }
    }
}

/// Raw `?filter=&sort=&page=` query. `page` stays a string so garbage falls back to page 1.
#[derive(Debug, Default, Deserialize)]
pub struct FilmListParams {
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub sort: String,
    #[serde(default)]
    pub page: Option<String>,
}

/// Resolved listing query handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmQuery {
    pub filter: Option<String>,
    pub sort: FilmSort,
    pub limit: i64,
    pub offset: i64,
}

impl FilmListParams {
    /// Rejects an unknown sort column and a page whose offset does not fit in an `i64`.
    pub fn resolve(&self) -> AppResult<FilmQuery> {
        let sort = FilmSort::parse(&self.sort)
            .ok_or_else(|| AppError::Validation(format!("Invalid sort field: {}", self.sort)))?;
        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let filter = Some(self.filter.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string);
        let offset = (page - 1)
            .checked_mul(FILMS_PAGE_SIZE)
            .ok_or_else(|| AppError::Validation("Page out of range".to_string()))?;
        Ok(FilmQuery {
            filter,
            sort,
            limit: FILMS_PAGE_SIZE,
            offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(filter: &str, sort: &str, page: Option<&str>) -> FilmListParams {
        FilmListParams {
            filter: filter.to_string(),
            sort: sort.to_string(),
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn page_defaults_and_clamps_to_one() {
        for page in [None, Some("0"), Some("-3"), Some("abc")] {
            let q = params("", "", page).resolve().unwrap();
            assert_eq!(q.offset, 0, "page {:?}", page);
            assert_eq!(q.limit, FILMS_PAGE_SIZE);
        }
    }

    #[test]
    fn page_sets_offset() {
        let q = params("", "title", Some("3")).resolve().unwrap();
        assert_eq!(q.offset, 20);
        assert_eq!(q.sort, FilmSort::Title);
    }

    #[test]
    fn unknown_sort_is_rejected() {
        assert!(matches!(
            params("", "title; DROP TABLE movies", None).resolve(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn huge_page_is_rejected_not_wrapped() {
        let max = i64::MAX.to_string();
        assert!(matches!(
            params("", "", Some(&max)).resolve(),
            Err(AppError::Validation(_))
        ));
        let last = (i64::MAX / FILMS_PAGE_SIZE + 1).to_string();
        let q = params("", "", Some(&last)).resolve().unwrap();
        assert!(q.offset >= 0);
    }

    #[test]
    fn blank_filter_is_dropped() {
        assert_eq!(params("  ", "", None).resolve().unwrap().filter, None);
        assert_eq!(
            params(" dune ", "", None).resolve().unwrap().filter.as_deref(),
            Some("dune")
        );
    }
}
