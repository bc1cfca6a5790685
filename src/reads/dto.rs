use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// Request body for `POST /reads`. `book_id` arrives as text so that a
/// missing or malformed id is a 400 rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpsertReadRequest {
    pub book_id: Option<String>,
    pub progress_pct: Option<i32>,
    pub rating: Option<i32>,
}

/// A validated read write, keyed by the caller and `book_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadUpdate {
    pub book_id: Uuid,
    pub progress_pct: i32,
    pub rating: Option<i32>,
}

impl ReadUpdate {
    pub fn new(book_id: Uuid) -> Self {
        Self {
            book_id,
            progress_pct: 0,
            rating: None,
        }
    }
}

impl TryFrom<UpsertReadRequest> for ReadUpdate {
    type Error = ApiError;

    fn try_from(req: UpsertReadRequest) -> Result<Self, Self::Error> {
        let raw = req
            .book_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::bad_request("book_id required"))?;
        let book_id = Uuid::parse_str(&raw)
            .map_err(|_| ApiError::bad_request("book_id must be a UUID"))?;

        let progress_pct = req.progress_pct.unwrap_or(0);
        if !(0..=100).contains(&progress_pct) {
            return Err(ApiError::bad_request("progress_pct must be between 0 and 100"));
        }

        Ok(Self {
            book_id,
            progress_pct,
            rating: req.rating,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<ReadUpdate, ApiError> {
        let req: UpsertReadRequest = serde_json::from_str(json).unwrap();
        ReadUpdate::try_from(req)
    }

    #[test]
    fn defaults_progress_to_zero_and_rating_to_none() {
        let id = Uuid::new_v4();
        let update = parse(&format!(r#"{{"book_id":"{id}"}}"#)).unwrap();
        assert_eq!(update, ReadUpdate::new(id));
    }

    #[test]
    fn missing_book_id_is_bad_request() {
        let err = parse(r#"{"progress_pct":40,"rating":4}"#).unwrap_err();
        assert_eq!(err.to_string(), "book_id required");
    }

    #[test]
    fn empty_book_id_is_bad_request() {
        assert!(matches!(parse(r#"{"book_id":""}"#), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn malformed_book_id_is_bad_request() {
        assert!(matches!(
            parse(r#"{"book_id":"nope"}"#),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn progress_out_of_range_is_bad_request() {
        let id = Uuid::new_v4();
        assert!(parse(&format!(r#"{{"book_id":"{id}","progress_pct":101}}"#)).is_err());
        assert!(parse(&format!(r#"{{"book_id":"{id}","progress_pct":-1}}"#)).is_err());
        assert!(parse(&format!(r#"{{"book_id":"{id}","progress_pct":100}}"#)).is_ok());
    }

    #[test]
    fn rating_is_not_range_checked() {
        let id = Uuid::new_v4();
        let update = parse(&format!(r#"{{"book_id":"{id}","rating":9}}"#)).unwrap();
        assert_eq!(update.rating, Some(9));
    }
}
