use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::sales::{CreateSaleRequest, DailySummary, SaleList},
    error::AppResult,
    middleware::json::JsonBody,
    models::SaleDetail,
    response::{Created, ErrorBody, created},
    services::sale_service,
    state::AppState,
};

pub fn route() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/summary", get(daily_summary))
}

#[utoipa::path(
    get,
    path = "/api/sales",
    responses(
        (status = 200, description = "Today's sales, newest first", body = SaleList),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
    tag = "Sales"
)]
pub async fn list_sales(State(state): State<AppState>) -> AppResult<Json<SaleList>> {
    let items = sale_service::list_today(&state).await?;
    Ok(Json(SaleList { items }))
}

#[utoipa::path(
    post,
    path = "/api/sales",
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Sale recorded", body = SaleDetail),
        (status = 400, description = "Invalid items or missing payment method", body = ErrorBody),
        (status = 404, description = "Payment method or product not found", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
    tag = "Sales"
)]
pub async fn create_sale(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateSaleRequest>,
) -> AppResult<Created<SaleDetail>> {
    let sale = sale_service::create_sale(&state, payload).await?;
    Ok(created(sale))
}

#[utoipa::path(
    get,
    path = "/api/sales/summary",
    responses(
        (status = 200, description = "Totals of today's sales", body = DailySummary),
    ),
    tag = "Sales"
)]
pub async fn daily_summary(State(state): State<AppState>) -> AppResult<Json<DailySummary>> {
    Ok(Json(sale_service::summary_today(&state).await?))
}
