use reqwest::{RequestBuilder, Response};
use tracing::{debug, instrument};

use super::{session::AuthContext, ClientError, ClientResult};
use crate::{
    books::{Book, NewBook, RankedBook},
    reads::{Read, ReadUpdate},
};

/// Thin wrappers over the service endpoints. A non-success status is
/// terminal for the action; nothing is retried.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    fn authed(&self, req: RequestBuilder, ctx: &AuthContext) -> RequestBuilder {
        match ctx.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn expect_ok(res: Response, action: &'static str) -> ClientResult<Response> {
        let status = res.status();
        if !status.is_success() {
            debug!(%status, action, "request rejected");
            return Err(ClientError::Status { action, status });
        }
        Ok(res)
    }

    #[instrument(skip(self))]
    pub async fn fetch_books(&self) -> ClientResult<Vec<RankedBook>> {
        let res = self.http.get(self.url("/books")).send().await?;
        let res = Self::expect_ok(res, "load books").await?;
        Ok(res.json().await?)
    }

    #[instrument(skip_all, fields(title = %book.title))]
    pub async fn add_book(&self, ctx: &AuthContext, book: &NewBook) -> ClientResult<Book> {
        let req = self.authed(self.http.post(self.url("/books")), ctx).json(book);
        let res = Self::expect_ok(req.send().await?, "add book").await?;
        Ok(res.json().await?)
    }

    #[instrument(skip_all, fields(book_id = %update.book_id))]
    pub async fn upsert_read(&self, ctx: &AuthContext, update: &ReadUpdate) -> ClientResult<Read> {
        let req = self.authed(self.http.post(self.url("/reads")), ctx).json(update);
        let res = Self::expect_ok(req.send().await?, "save progress").await?;
        Ok(res.json().await?)
    }

    #[instrument(skip_all)]
    pub async fn upsert_user(&self, ctx: &AuthContext) -> ClientResult<()> {
        let req = self.authed(self.http.post(self.url("/users/upsert")), ctx);
        Self::expect_ok(req.send().await?, "sync user").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::{
        client::Session,
        test_support::{member, TestApp},
    };

    fn signed_in(app: &TestApp, name: &str) -> AuthContext {
        let identity = member(name);
        AuthContext::signed_in(Session {
            token: app.token_for(&identity),
            identity,
        })
    }

    #[tokio::test]
    async fn anonymous_writes_fail_with_unauthorized() {
        let app = TestApp::spawn().await;
        let api = ApiClient::new(&app.base_url);
        let anon = AuthContext::anonymous();

        let err = api.add_book(&anon, &NewBook::titled("Dune")).await.unwrap_err();
        match err {
            ClientError::Status { action, status } => {
                assert_eq!(action, "add book");
                assert_eq!(status, StatusCode::UNAUTHORIZED);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(api.upsert_user(&anon).await.is_err());
        let update = ReadUpdate::new(uuid::Uuid::new_v4());
        assert!(api.upsert_read(&anon, &update).await.is_err());
    }

    #[tokio::test]
    async fn added_book_shows_up_in_listing_with_its_fields() {
        let app = TestApp::spawn().await;
        let api = ApiClient::new(format!("{}/", app.base_url));
        let ctx = signed_in(&app, "Ada");

        let book = NewBook {
            title: "The Left Hand of Darkness".into(),
            author: Some("Ursula K. Le Guin".into()),
            genre: Some("Science fiction".into()),
            summary: Some("An envoy on Gethen.".into()),
            cover_url: Some("https://covers.test/lhod.jpg".into()),
        };
        let created = api.add_book(&ctx, &book).await.unwrap();

        let listed = api.fetch_books().await.unwrap();
        assert_eq!(listed.len(), 1);
        let row = &listed[0];
        assert_eq!(row.book, created);
        assert_eq!(row.book.author, book.author);
        assert_eq!(row.book.genre, book.genre);
        assert_eq!(row.book.summary, book.summary);
        assert_eq!(row.book.cover_url, book.cover_url);
        assert_eq!(row.avg_rating, None);
    }

    #[tokio::test]
    async fn progress_and_rating_flow_into_average() {
        let app = TestApp::spawn().await;
        let api = ApiClient::new(&app.base_url);
        let ada = signed_in(&app, "Ada");
        let bo = signed_in(&app, "Bo");
        api.upsert_user(&ada).await.unwrap();
        api.upsert_user(&bo).await.unwrap();

        let book = api.add_book(&ada, &NewBook::titled("Emma")).await.unwrap();
        let mut update = ReadUpdate::new(book.id);
        update.rating = Some(4);
        api.upsert_read(&ada, &update).await.unwrap();
        update.rating = Some(5);
        update.progress_pct = 100;
        let read = api.upsert_read(&bo, &update).await.unwrap();
        assert_eq!(read.progress_pct, 100);

        let listed = api.fetch_books().await.unwrap();
        // avg 4.5 rounds up
        assert_eq!(listed[0].avg_rating, Some(5));
    }
}
