use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};

use crate::{
    dto::payments::{CreatePaymentMethodRequest, PaymentMethodList, UpdatePaymentMethodRequest},
    error::AppResult,
    middleware::{json::JsonBody, path::PathParam},
    models::PaymentMethod,
    response::{Created, ErrorBody, created},
    services::payment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payment_methods).post(create_payment_method))
        .route("/{id}", put(update_payment_method))
}

#[utoipa::path(
    get,
    path = "/api/payments",
    responses(
        (status = 200, description = "Payment methods ordered by name", body = PaymentMethodList),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
    tag = "Payments"
)]
pub async fn list_payment_methods(
    State(state): State<AppState>,
) -> AppResult<Json<PaymentMethodList>> {
    let items = payment_service::list_payment_methods(&state).await?;
    Ok(Json(PaymentMethodList { items }))
}

#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = CreatePaymentMethodRequest,
    responses(
        (status = 201, description = "Payment method created", body = PaymentMethod),
        (status = 400, description = "Missing name or tax rate", body = ErrorBody),
    ),
    tag = "Payments"
)]
pub async fn create_payment_method(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreatePaymentMethodRequest>,
) -> AppResult<Created<PaymentMethod>> {
    let method = payment_service::create_payment_method(&state, payload).await?;
    Ok(created(method))
}

#[utoipa::path(
    put,
    path = "/api/payments/{id}",
    params(
        ("id" = i32, Path, description = "Payment method ID")
    ),
    request_body = UpdatePaymentMethodRequest,
    responses(
        (status = 200, description = "Payment method updated", body = PaymentMethod),
        (status = 400, description = "Invalid name or tax rate", body = ErrorBody),
        (status = 404, description = "Payment method not found", body = ErrorBody),
    ),
    tag = "Payments"
)]
pub async fn update_payment_method(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<UpdatePaymentMethodRequest>,
) -> AppResult<Json<PaymentMethod>> {
    let method = payment_service::update_payment_method(&state, id, payload).await?;
    Ok(Json(method))
}
