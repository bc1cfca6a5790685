use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Book record in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub summary: Option<String>,
    pub cover_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A listing row: the book plus the rounded average of its ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RankedBook {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub book: Book,
    pub avg_rating: Option<i32>,
}
