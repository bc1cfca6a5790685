use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{ReadUpdate, UpsertReadRequest},
    repo_types::Read,
};
use crate::{
    auth::AuthUser,
    error::{method_not_allowed, ApiResult},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/reads", post(upsert_read).fallback(method_not_allowed))
}

#[instrument(skip_all, fields(user_id = %who.id))]
pub async fn upsert_read(
    State(state): State<AppState>,
    AuthUser(who): AuthUser,
    payload: Result<Json<UpsertReadRequest>, JsonRejection>,
) -> ApiResult<Json<Read>> {
    let Json(body) = payload?;
    let update = ReadUpdate::try_from(body)?;
    let row = state.reads.upsert_read(who.id, &update).await?;
    info!(
        book_id = %row.book_id,
        progress_pct = row.progress_pct,
        rating = ?row.rating,
        "read saved"
    );
    Ok(Json(row))
}
