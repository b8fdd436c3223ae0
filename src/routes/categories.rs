use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, put},
};
use uuid::Uuid;

use crate::{
    dto::categories::{CategoryList, CreateCategoryRequest, ReorderCategoriesRequest},
    error::AppResult,
    middleware::household::HouseholdUser,
    models::Category,
    response::ApiResponse,
    services::category_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/order", put(reorder_categories))
        .route("/{id}", delete(delete_category))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories in display order", body = ApiResponse<CategoryList>)
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    user: HouseholdUser,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = category_service::list_categories(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Category created", body = ApiResponse<Category>),
        (status = 409, description = "Duplicate or reserved name"),
    ),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: HouseholdUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = category_service::create_category(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/categories/order",
    request_body = ReorderCategoriesRequest,
    responses(
        (status = 200, description = "Categories reordered", body = ApiResponse<CategoryList>),
        (status = 400, description = "Ids do not match the existing categories"),
    ),
    tag = "Categories"
)]
pub async fn reorder_categories(
    State(state): State<AppState>,
    user: HouseholdUser,
    Json(payload): Json<ReorderCategoriesRequest>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = category_service::reorder_categories(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    user: HouseholdUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = category_service::delete_category(&state, &user, id).await?;
    Ok(Json(resp))
}
