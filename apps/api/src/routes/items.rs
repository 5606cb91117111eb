//! Item endpoints: detail and owner listing with last/next booking.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use shareit_core::ItemView;

use crate::error::ApiResult;
use crate::extract::{ActingUser, AppPath, AppQuery};
use crate::state::AppState;

/// `?from=&size=`
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub from: Option<i64>,
    pub size: Option<i64>,
}

pub fn build_item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_owner_items))
        .route("/items/{item_id}", get(get_item))
}

pub async fn get_item(
    user: ActingUser,
    State(state): State<AppState>,
    AppPath(item_id): AppPath<i64>,
) -> ApiResult<Json<ItemView>> {
    let item = state.items().get_item(item_id, user.id()).await?;

    Ok(Json(item))
}

pub async fn list_owner_items(
    user: ActingUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PageQuery>,
) -> ApiResult<Json<Vec<ItemView>>> {
    let items = state
        .items()
        .list_owner_items(user.id(), query.from, query.size)
        .await?;

    Ok(Json(items))
}
