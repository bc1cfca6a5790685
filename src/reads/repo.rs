use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use super::{dto::ReadUpdate, repo_types::Read};
use crate::db::PgStore;

#[async_trait]
pub trait ReadRepo: Send + Sync {
    /// Insert or replace the read for `(user_id, update.book_id)`.
    /// Progress and rating are overwritten, never merged.
    async fn upsert_read(&self, user_id: Uuid, update: &ReadUpdate) -> anyhow::Result<Read>;
}

#[async_trait]
impl ReadRepo for PgStore {
    async fn upsert_read(&self, user_id: Uuid, update: &ReadUpdate) -> anyhow::Result<Read> {
        let row = sqlx::query_as::<_, Read>(
            r#"
            INSERT INTO reads (user_id, book_id, progress_pct, rating)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, book_id)
            DO UPDATE SET progress_pct = EXCLUDED.progress_pct,
                          rating       = EXCLUDED.rating,
                          updated_at   = now()
            RETURNING user_id, book_id, progress_pct, rating, updated_at
            "#,
        )
        .bind(user_id)
        .bind(update.book_id)
        .bind(update.progress_pct)
        .bind(update.rating)
        .fetch_one(&self.db)
        .await
        .with_context(|| format!("upsert read for book {}", update.book_id))?;
        Ok(row)
    }
}
