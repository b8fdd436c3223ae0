use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::lists::{
        CompletePurchaseRequest, CreateListRequest, PurchaseSummary, ReplaceItemsRequest,
        ShoppingLists, UpdateListRequest,
    },
    error::AppResult,
    middleware::household::HouseholdUser,
    models::ShoppingList,
    response::ApiResponse,
    routes::params::{ListDetailQuery, ListQuery},
    services::{list_service, pantry_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_lists).post(create_list))
        .route(
            "/{id}",
            get(get_list).patch(update_list).delete(delete_list),
        )
        .route("/{id}/items", put(replace_items))
        .route("/{id}/archive", post(archive_list))
        .route("/{id}/restore", post(restore_list))
        .route("/{id}/complete", post(complete_purchase))
}

#[utoipa::path(
    get,
    path = "/api/lists",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("archived" = Option<bool>, Query, description = "Filter by archived flag"),
        ("sort_order" = Option<String>, Query, description = "Sort order: asc, desc")
    ),
    responses(
        (status = 200, description = "Shopping lists of the household", body = ApiResponse<ShoppingLists>)
    ),
    tag = "Lists"
)]
pub async fn list_lists(
    State(state): State<AppState>,
    user: HouseholdUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<ShoppingLists>>> {
    let resp = list_service::list_lists(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/lists",
    request_body = CreateListRequest,
    responses(
        (status = 200, description = "List created", body = ApiResponse<ShoppingList>),
        (status = 400, description = "Bad request"),
    ),
    tag = "Lists"
)]
pub async fn create_list(
    State(state): State<AppState>,
    user: HouseholdUser,
    Json(payload): Json<CreateListRequest>,
) -> AppResult<Json<ApiResponse<ShoppingList>>> {
    let resp = list_service::create_list(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/lists/{id}",
    params(
        ("id" = Uuid, Path, description = "List ID"),
        ("sort" = Option<String>, Query, description = "Item order: recent, name, category")
    ),
    responses(
        (status = 200, description = "List with items", body = ApiResponse<ShoppingList>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Lists"
)]
pub async fn get_list(
    State(state): State<AppState>,
    user: HouseholdUser,
    Path(id): Path<Uuid>,
    Query(query): Query<ListDetailQuery>,
) -> AppResult<Json<ApiResponse<ShoppingList>>> {
    let resp = list_service::get_list(&state, &user, id, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/lists/{id}",
    params(("id" = Uuid, Path, description = "List ID")),
    request_body = UpdateListRequest,
    responses(
        (status = 200, description = "List updated", body = ApiResponse<ShoppingList>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "List is archived"),
    ),
    tag = "Lists"
)]
pub async fn update_list(
    State(state): State<AppState>,
    user: HouseholdUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateListRequest>,
) -> AppResult<Json<ApiResponse<ShoppingList>>> {
    let resp = list_service::update_list(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/lists/{id}/items",
    params(("id" = Uuid, Path, description = "List ID")),
    request_body = ReplaceItemsRequest,
    responses(
        (status = 200, description = "Items replaced", body = ApiResponse<ShoppingList>),
        (status = 400, description = "Invalid item"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "List is archived"),
    ),
    tag = "Lists"
)]
pub async fn replace_items(
    State(state): State<AppState>,
    user: HouseholdUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplaceItemsRequest>,
) -> AppResult<Json<ApiResponse<ShoppingList>>> {
    let resp = list_service::replace_items(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/lists/{id}/archive",
    params(("id" = Uuid, Path, description = "List ID")),
    responses(
        (status = 200, description = "List archived", body = ApiResponse<ShoppingList>),
        (status = 400, description = "Already archived"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Lists"
)]
pub async fn archive_list(
    State(state): State<AppState>,
    user: HouseholdUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ShoppingList>>> {
    let resp = list_service::archive_list(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/lists/{id}/restore",
    params(("id" = Uuid, Path, description = "List ID")),
    responses(
        (status = 200, description = "List restored", body = ApiResponse<ShoppingList>),
        (status = 400, description = "Not archived"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Lists"
)]
pub async fn restore_list(
    State(state): State<AppState>,
    user: HouseholdUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ShoppingList>>> {
    let resp = list_service::restore_list(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/lists/{id}",
    params(("id" = Uuid, Path, description = "List ID")),
    responses(
        (status = 200, description = "List deleted", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "The pantry cannot be deleted"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Lists"
)]
pub async fn delete_list(
    State(state): State<AppState>,
    user: HouseholdUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = list_service::delete_list(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/lists/{id}/complete",
    params(("id" = Uuid, Path, description = "List ID")),
    request_body = CompletePurchaseRequest,
    responses(
        (status = 200, description = "Completed items merged into the pantry", body = ApiResponse<PurchaseSummary>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "List is archived"),
    ),
    tag = "Lists"
)]
pub async fn complete_purchase(
    State(state): State<AppState>,
    user: HouseholdUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CompletePurchaseRequest>,
) -> AppResult<Json<ApiResponse<PurchaseSummary>>> {
    let resp = pantry_service::complete_purchase(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
