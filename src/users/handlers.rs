use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    auth::AuthUser,
    error::{method_not_allowed, ApiResult},
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OkResponse {
    pub ok: bool,
}

pub fn routes() -> Router<AppState> {
    // login hooks call this with or without an explicit verb
    Router::new().route(
        "/users/upsert",
        get(upsert_user)
            .post(upsert_user)
            .fallback(method_not_allowed),
    )
}

#[instrument(skip_all, fields(user_id = %who.id))]
pub async fn upsert_user(
    State(state): State<AppState>,
    AuthUser(who): AuthUser,
) -> ApiResult<Json<OkResponse>> {
    let user = state.users.upsert_user(&who).await?;
    info!(email = ?user.email, "user synced");
    Ok(Json(OkResponse { ok: true }))
}
