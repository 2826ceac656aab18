//! Read-only film catalog backed by the `movies` table.

use async_trait::async_trait;

use super::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Film, FilmQuery};

pub(crate) const FILM_NOT_FOUND: &str = "Film not found";

#[async_trait]
pub trait FilmRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> AppResult<Film>;

    /// One page of films matching `query`.
    async fn list(&self, query: &FilmQuery) -> AppResult<Vec<Film>>;
}

#[derive(Clone)]
pub struct PgFilmRepository {
    pool: DbPool,
}

impl PgFilmRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE wildcards so the filter is a plain substring match.
fn like_pattern(filter: &str) -> String {
    let escaped = filter
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl FilmRepository for PgFilmRepository {
    async fn get_by_id(&self, id: i64) -> AppResult<Film> {
        sqlx::query_as::<_, Film>(
            "SELECT id, title, description, director, release_year FROM movies WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(FILM_NOT_FOUND.to_string()))
    }

    async fn list(&self, query: &FilmQuery) -> AppResult<Vec<Film>> {
        // column name comes from the FilmSort whitelist
        let sql = format!(
            r#"
            SELECT id, title, description, director, release_year
            FROM movies
            WHERE ($1::text IS NULL OR title ILIKE $1)
            ORDER BY {}, id
            LIMIT $2 OFFSET $3
            "#,
            query.sort.column()
        );
        let rows = sqlx::query_as::<_, Film>(&sql)
            .bind(query.filter.as_deref().map(like_pattern))
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("dune"), "%dune%");
        assert_eq!(like_pattern("100%_"), "%100\\%\\_%");
    }
}
