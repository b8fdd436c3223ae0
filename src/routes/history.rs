use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::history::{HistoryList, PriceHistoryList},
    error::AppResult,
    middleware::household::HouseholdUser,
    response::ApiResponse,
    routes::params::{HistoryQuery, PriceQuery},
    services::history_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/history", get(list_history))
        .route("/prices", get(price_history))
}

#[utoipa::path(
    get,
    path = "/api/history",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("action" = Option<String>, Query, description = "Filter by action")
    ),
    responses(
        (status = 200, description = "History events, newest first", body = ApiResponse<HistoryList>)
    ),
    tag = "History"
)]
pub async fn list_history(
    State(state): State<AppState>,
    user: HouseholdUser,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<ApiResponse<HistoryList>>> {
    let resp = history_service::list_history(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/prices",
    params(
        ("name" = String, Query, description = "Product name"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Recorded prices, newest first", body = ApiResponse<PriceHistoryList>),
        (status = 400, description = "Missing name"),
    ),
    tag = "History"
)]
pub async fn price_history(
    State(state): State<AppState>,
    user: HouseholdUser,
    Query(query): Query<PriceQuery>,
) -> AppResult<Json<ApiResponse<PriceHistoryList>>> {
    let resp = history_service::price_history(&state, &user, query).await?;
    Ok(Json(resp))
}
