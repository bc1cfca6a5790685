use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Local mirror of an identity-provider user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                   // identity id
    pub email: Option<String>,
    pub name: Option<String>,       // display name from user metadata
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
