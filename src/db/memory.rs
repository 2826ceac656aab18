//! In-process repositories with the same contract as the Postgres ones.
//! Used by the router tests and for running without a database.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::films::{FilmRepository, FILM_NOT_FOUND};
use super::users::{UserRepository, DUPLICATE_EMAIL, USER_NOT_FOUND};
use crate::error::{AppError, AppResult};
use crate::models::{Film, FilmQuery, FilmSort, NewUser, User};

#[derive(Default)]
struct UserTable {
    next_id: i64,
    rows: BTreeMap<i64, User>,
}

impl UserTable {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// Uniqueness is checked under the write lock, so concurrent signups race the same way they
/// would against a unique index.
#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut table = self.table.write().await;
        if table.email_taken(&user.email, None) {
            return Err(AppError::Duplicate(DUPLICATE_EMAIL.to_string()));
        }
        table.next_id += 1;
        let row = User {
            id: table.next_id,
            email: user.email,
            password_hash: user.password_hash,
            email_confirmed: false,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
    }

    async fn get_by_email(&self, email: &str) -> AppResult<User> {
        self.table
            .read()
            .await
            .rows
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&user.id) {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        }
        if table.email_taken(&user.email, Some(user.id)) {
            return Err(AppError::Duplicate(DUPLICATE_EMAIL.to_string()));
        }
        table.rows.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn confirm_email(&self, email: &str) -> AppResult<()> {
        let mut table = self.table.write().await;
        let user = table
            .rows
            .values_mut()
            .find(|u| u.email == email)
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;
        user.email_confirmed = true;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryFilmRepository {
    films: Arc<Vec<Film>>,
}

impl MemoryFilmRepository {
    pub fn new(films: Vec<Film>) -> Self {
        Self {
            films: Arc::new(films),
        }
    }
}

#[async_trait]
impl FilmRepository for MemoryFilmRepository {
    async fn get_by_id(&self, id: i64) -> AppResult<Film> {
        self.films
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(FILM_NOT_FOUND.to_string()))
    }

    async fn list(&self, query: &FilmQuery) -> AppResult<Vec<Film>> {
        let needle = query.filter.as_ref().map(|f| f.to_lowercase());
        let mut films: Vec<Film> = self
            .films
            .iter()
            .filter(|f| match &needle {
                Some(n) => f.title.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        films.sort_by(|a, b| {
            let primary = match query.sort {
                FilmSort::Id => a.id.cmp(&b.id),
                FilmSort::Title => a.title.cmp(&b.title),
                FilmSort::Director => a.director.cmp(&b.director),
                FilmSort::ReleaseYear => a.release_year.cmp(&b.release_year),
            };
            primary.then(a.id.cmp(&b.id))
        });
        Ok(films
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .collect())
    }
}
