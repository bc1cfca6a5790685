use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Fields accepted when adding a book. Everything but the title is optional
/// and blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBook {
    pub title: String,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub summary: Option<String>,
    #[serde(rename = "coverUrl", alias = "cover_url")]
    pub cover_url: Option<String>,
}

impl NewBook {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Trims every field, drops blank optionals and rejects a blank title.
    pub fn normalized(self) -> Result<Self, ApiError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ApiError::bad_request("Title required"));
        }
        Ok(Self {
            title,
            author: blank_to_none(self.author),
            genre: blank_to_none(self.genre),
            summary: blank_to_none(self.summary),
            cover_url: blank_to_none(self.cover_url),
        })
    }
}

pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
