use anyhow::Context;
use async_trait::async_trait;

use super::repo_types::User;
use crate::{auth::Identity, db::PgStore};

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Create or refresh the user row for `identity` from its claims.
    async fn upsert_user(&self, identity: &Identity) -> anyhow::Result<User>;
}

#[async_trait]
impl UserRepo for PgStore {
    async fn upsert_user(&self, identity: &Identity) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id)
            DO UPDATE SET email      = EXCLUDED.email,
                          name       = EXCLUDED.name,
                          updated_at = now()
            RETURNING id, email, name, updated_at
            "#,
        )
        .bind(identity.id)
        .bind(&identity.email)
        .bind(&identity.name)
        .fetch_one(&self.db)
        .await
        .context("upsert user")?;
        Ok(user)
    }
}
