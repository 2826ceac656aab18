//! Database layer: pool, migrations, and repositories.

mod films;
mod memory;
mod pool;
mod users;

pub use films::{FilmRepository, PgFilmRepository};
pub use memory::{MemoryFilmRepository, MemoryUserRepository};
pub use pool::{create_pool, run_migrations, DbPool};
pub use users::{PgUserRepository, UserRepository};
