use crate::{
    dto::items::CreateItemRequest,
    error::{AppError, AppResult},
    models::Item,
    state::AppState,
};

pub async fn list_items(state: &AppState) -> AppResult<Vec<Item>> {
    Ok(state.items.list().await?)
}

pub async fn create_item(state: &AppState, payload: CreateItemRequest) -> AppResult<Item> {
    if payload.title.trim().is_empty() {
        return Err(AppError::bad_request("title is required"));
    }
    Ok(state.items.create(payload.title).await?)
}
