use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::NewBook,
    repo_types::{Book, RankedBook},
};
use crate::{
    auth::AuthUser,
    error::{method_not_allowed, ApiResult},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/books",
        get(list_books)
            .post(add_book)
            .fallback(method_not_allowed),
    )
}

#[instrument(skip(state))]
pub async fn list_books(State(state): State<AppState>) -> ApiResult<Json<Vec<RankedBook>>> {
    let rows = state.books.list_ranked().await?;
    Ok(Json(rows))
}

#[instrument(skip_all, fields(user_id = %who.id))]
pub async fn add_book(
    State(state): State<AppState>,
    AuthUser(who): AuthUser,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> ApiResult<Json<Book>> {
    let Json(body) = payload?;
    let book = body.normalized()?;
    let row = state.books.insert_book(&book).await?;
    info!(book_id = %row.id, title = %row.title, "book added");
    Ok(Json(row))
}
