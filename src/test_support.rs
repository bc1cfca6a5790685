use std::sync::Arc;

use time::Duration;
use uuid::Uuid;

use crate::{
    app::build_app,
    auth::{Identity, JwtKeys},
    memory::MemoryStore,
    state::AppState,
};

/// A router served on an ephemeral local port over the in-memory store.
pub(crate) struct TestApp {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub keys: JwtKeys,
    pub http: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let (state, store) = AppState::fake();
        let keys = JwtKeys::from(&state.config.jwt);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, build_app(state)).await.expect("serve");
        });
        Self {
            base_url: format!("http://{addr}"),
            store,
            keys,
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    pub fn token_for(&self, identity: &Identity) -> String {
        self.keys
            .sign(identity, Duration::minutes(10))
            .expect("sign test token")
    }
}

pub(crate) fn member(name: &str) -> Identity {
    Identity {
        id: Uuid::new_v4(),
        email: Some(format!("{}@club.test", name.to_lowercase())),
        name: Some(name.to_string()),
    }
}
