use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post, put},
};

use crate::{
    dto::{
        lists::ReplaceItemsRequest,
        pantry::{GenerateListRequest, GenerateListResponse, LookupQuery, PantryItemView, PantryView},
    },
    error::AppResult,
    middleware::household::HouseholdUser,
    response::ApiResponse,
    services::pantry_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_pantry))
        .route("/items", put(replace_pantry_items))
        .route("/generate", post(generate_list))
        .route("/lookup", get(lookup_item))
}

#[utoipa::path(
    get,
    path = "/api/pantry",
    responses(
        (status = 200, description = "Pantry with stock status per item", body = ApiResponse<PantryView>)
    ),
    tag = "Pantry"
)]
pub async fn get_pantry(
    State(state): State<AppState>,
    user: HouseholdUser,
) -> AppResult<Json<ApiResponse<PantryView>>> {
    let resp = pantry_service::get_pantry(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/pantry/items",
    request_body = ReplaceItemsRequest,
    responses(
        (status = 200, description = "Pantry items replaced", body = ApiResponse<PantryView>),
        (status = 400, description = "Invalid item"),
    ),
    tag = "Pantry"
)]
pub async fn replace_pantry_items(
    State(state): State<AppState>,
    user: HouseholdUser,
    Json(payload): Json<ReplaceItemsRequest>,
) -> AppResult<Json<ApiResponse<PantryView>>> {
    let resp = pantry_service::replace_pantry_items(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/pantry/generate",
    request_body = GenerateListRequest,
    responses(
        (status = 200, description = "Generated list, or nothing_to_buy", body = ApiResponse<GenerateListResponse>)
    ),
    tag = "Pantry"
)]
pub async fn generate_list(
    State(state): State<AppState>,
    user: HouseholdUser,
    Json(payload): Json<GenerateListRequest>,
) -> AppResult<Json<ApiResponse<GenerateListResponse>>> {
    let resp = pantry_service::generate_list(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/pantry/lookup",
    params(("name" = String, Query, description = "Full or partial product name")),
    responses(
        (status = 200, description = "Best matching pantry item", body = ApiResponse<PantryItemView>),
        (status = 404, description = "No match"),
    ),
    tag = "Pantry"
)]
pub async fn lookup_item(
    State(state): State<AppState>,
    user: HouseholdUser,
    Query(query): Query<LookupQuery>,
) -> AppResult<Json<ApiResponse<PantryItemView>>> {
    let resp = pantry_service::lookup_item(&state, &user, query).await?;
    Ok(Json(resp))
}
