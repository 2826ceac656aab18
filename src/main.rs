//! Entry point: load config, wire dependencies, and run the server.

use std::sync::Arc;
use ticketoff::auth::JwtSecret;
use ticketoff::config::Config;
use ticketoff::db::{self, PgFilmRepository, PgUserRepository};
use ticketoff::mail::LogMailer;
use ticketoff::{create_app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_pool = db::create_pool(&config.database_url).await?;
    if config.run_migrations {
        db::run_migrations(&db_pool).await?;
        tracing::info!("migrations applied");
    }

    let state = AppState {
        users: Arc::new(PgUserRepository::new(db_pool.clone())),
        films: Arc::new(PgFilmRepository::new(db_pool)),
        mailer: Arc::new(LogMailer),
        jwt_secret: JwtSecret::new(config.jwt_secret.clone()),
        public_base_url: config.public_base_url.clone(),
    };

    let app = create_app(state);

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
