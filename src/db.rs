use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{info, warn};

use crate::config::AppConfig;

/// Postgres-backed implementation of the book, read and user repositories.
#[derive(Clone)]
pub struct PgStore {
    pub db: PgPool,
}

impl PgStore {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    /// Applies the bundled migrations; a failure is logged and tolerated so a
    /// pre-provisioned schema still boots.
    pub async fn migrate(&self) {
        match sqlx::migrate!("./migrations").run(&self.db).await {
            Ok(()) => info!("migrations applied"),
            Err(e) => warn!(error = %e, "migration failed; continuing"),
        }
    }
}
