use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// One member's progress and rating for one book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Read {
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub progress_pct: i32,
    pub rating: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
