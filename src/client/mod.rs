//! Client side of the book club: HTTP wrappers for the service, the
//! explicit authentication state, the device-local shelf and the metadata
//! lookup used to pre-fill it.

mod api;
mod lookup;
mod session;
mod shelf;

pub use api::ApiClient;
pub use lookup::{BookLookup, ImageLinks, VolumeInfo, GOOGLE_BOOKS_URL};
pub use session::{AuthContext, Gate, Session, SessionFlow};
pub use shelf::{FileStore, KeyValueStore, LocalBook, LocalDraft, LocalShelf, MemoryKv, BOOKS_KEY};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to {action} (status {status})")]
    Status {
        action: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Invalid(String),
    #[error("local storage: {0}")]
    Io(#[from] std::io::Error),
    #[error("local storage encoding: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
