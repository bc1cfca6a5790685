use serde::Deserialize;
use tracing::debug;

pub const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// The parts of a Google Books `volumeInfo` the tracker uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

/// Title search against a volumes endpoint.
#[derive(Clone)]
pub struct BookLookup {
    http: reqwest::Client,
    endpoint: String,
}

impl Default for BookLookup {
    fn default() -> Self {
        Self::with_endpoint(GOOGLE_BOOKS_URL)
    }
}

impl BookLookup {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Best match for `title`. Any failure reads as "nothing found".
    pub async fn find(&self, title: &str) -> Option<VolumeInfo> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let url = format!(
            "{}?q={}&maxResults=1",
            self.endpoint,
            urlencoding::encode(title)
        );

        let res = match self.http.get(&url).send().await {
            Ok(res) if res.status().is_success() => res,
            Ok(res) => {
                debug!(status = %res.status(), title, "lookup rejected");
                return None;
            }
            Err(e) => {
                debug!(error = %e, title, "lookup failed");
                return None;
            }
        };
        match res.json::<VolumesResponse>().await {
            Ok(body) => body.items.into_iter().next().map(|v| v.volume_info),
            Err(e) => {
                debug!(error = %e, title, "lookup response unreadable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/volumes")
    }

    async fn volumes(Query(q): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
        if q.get("q").map(String::as_str) == Some("Nothing Here") {
            return Json(json!({ "totalItems": 0 }));
        }
        assert_eq!(q.get("maxResults").map(String::as_str), Some("1"));
        let title = q.get("q").cloned().unwrap_or_default();
        Json(json!({
            "items": [{
                "volumeInfo": {
                    "title": title,
                    "description": "A desert planet.",
                    "categories": ["Fiction"],
                    "imageLinks": { "thumbnail": "http://books.test/c?zoom=1" }
                }
            }]
        }))
    }

    #[tokio::test]
    async fn finds_first_volume() {
        let endpoint = serve(Router::new().route("/volumes", get(volumes))).await;
        let lookup = BookLookup::with_endpoint(endpoint);
        let info = lookup.find("Dune Messiah").await.unwrap();
        assert_eq!(info.description.as_deref(), Some("A desert planet."));
        assert_eq!(info.categories, vec!["Fiction".to_string()]);
        assert_eq!(
            info.image_links.and_then(|l| l.thumbnail).as_deref(),
            Some("http://books.test/c?zoom=1")
        );
    }

    #[tokio::test]
    async fn no_items_is_none() {
        let endpoint = serve(Router::new().route("/volumes", get(volumes))).await;
        let lookup = BookLookup::with_endpoint(endpoint);
        assert_eq!(lookup.find("Nothing Here").await, None);
    }

    #[tokio::test]
    async fn server_error_is_swallowed() {
        let router = Router::new().route(
            "/volumes",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let lookup = BookLookup::with_endpoint(serve(router).await);
        assert_eq!(lookup.find("Dune").await, None);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_swallowed() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let lookup = BookLookup::with_endpoint(format!("http://{addr}/volumes"));
        assert_eq!(lookup.find("Dune").await, None);
    }

    #[tokio::test]
    async fn blank_title_skips_request() {
        let lookup = BookLookup::with_endpoint("http://127.0.0.1:1/volumes");
        assert_eq!(lookup.find("   ").await, None);
    }
}
