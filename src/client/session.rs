use tracing::{info, warn};

use super::{api::ApiClient, ClientResult};
use crate::{auth::Identity, books::RankedBook};

/// A logged-in session: the provider's bearer token plus its claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
}

/// Sections of the page that depend on who is looking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Shown only to logged-in members.
    Required,
    /// Shown only to visitors.
    Guest,
}

/// Authentication state handed to every client action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    session: Option<Session>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(session: Session) -> Self {
        Self {
            session: Some(session),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.as_ref().map(|s| &s.identity)
    }

    /// Full name when the provider has one, else the email.
    pub fn display_name(&self) -> Option<&str> {
        let identity = self.identity()?;
        identity.name.as_deref().or(identity.email.as_deref())
    }

    pub fn is_visible(&self, gate: Gate) -> bool {
        match gate {
            Gate::Required => self.is_authenticated(),
            Gate::Guest => !self.is_authenticated(),
        }
    }
}

/// Drives login and logout: updates the context, mirrors the user on
/// login, and reloads the shared listing after either.
pub struct SessionFlow {
    api: ApiClient,
    ctx: AuthContext,
    books: Vec<RankedBook>,
}

impl SessionFlow {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            ctx: AuthContext::anonymous(),
            books: Vec::new(),
        }
    }

    pub fn context(&self) -> &AuthContext {
        &self.ctx
    }

    pub fn books(&self) -> &[RankedBook] {
        &self.books
    }

    pub async fn refresh(&mut self) -> ClientResult<&[RankedBook]> {
        self.books = self.api.fetch_books().await?;
        Ok(&self.books)
    }

    /// The user sync is best-effort; the login stands even if it fails.
    pub async fn on_login(&mut self, session: Session) -> ClientResult<&[RankedBook]> {
        self.ctx = AuthContext::signed_in(session);
        if let Err(e) = self.api.upsert_user(&self.ctx).await {
            warn!(error = %e, "user sync after login failed");
        }
        info!(user = ?self.ctx.display_name(), "logged in");
        self.refresh().await
    }

    pub async fn on_logout(&mut self) -> ClientResult<&[RankedBook]> {
        self.ctx = AuthContext::anonymous();
        info!("logged out");
        self.refresh().await
    }
}
