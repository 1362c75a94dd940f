use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::items::{CreateItemRequest, ItemList},
    error::AppResult,
    middleware::json::JsonBody,
    models::Item,
    response::{Created, created},
    services::item_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_items).post(create_item))
}

#[utoipa::path(get, path = "/api/items", responses((status = 200, body = ItemList)), tag = "Items")]
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<ItemList>> {
    let items = item_service::list_items(&state).await?;
    Ok(Json(ItemList { items }))
}

#[utoipa::path(
    post,
    path = "/api/items",
    request_body = CreateItemRequest,
    responses((status = 201, body = Item)),
    tag = "Items"
)]
pub async fn create_item(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateItemRequest>,
) -> AppResult<Created<Item>> {
    Ok(created(item_service::create_item(&state, payload).await?))
}
