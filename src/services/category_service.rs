use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};
use sea_orm::sea_query::LockType;
use uuid::Uuid;

use crate::{
    dto::categories::{CategoryList, CreateCategoryRequest, ReorderCategoriesRequest},
    entity::{
        categories::{
            ActiveModel as CategoryActive, Column as CategoryCol, Entity as Categories,
            Model as CategoryModel,
        },
        lists::{ActiveModel as ListActive, Column as ListCol, Entity as Lists},
    },
    error::{AppError, AppResult},
    middleware::household::HouseholdUser,
    models::{Category, Item},
    pantry::normalize_name,
    response::{ApiResponse, Meta},
    services::{items_from_entity, items_to_json},
    state::AppState,
};

pub async fn list_categories(
    state: &AppState,
    user: &HouseholdUser,
) -> AppResult<ApiResponse<CategoryList>> {
    let items = Categories::find()
        .filter(CategoryCol::UserId.eq(user.user_id))
        .order_by_asc(CategoryCol::Position)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(Meta::empty()),
    ))
}

/// Append a category at the end of the user's order.
pub async fn create_category(
    state: &AppState,
    user: &HouseholdUser,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    if name.eq_ignore_ascii_case(&state.settings.default_category) {
        return Err(AppError::Conflict(format!("{name} is reserved")));
    }

    let existing = Categories::find()
        .filter(CategoryCol::UserId.eq(user.user_id))
        .all(&state.orm)
        .await?;
    let key = normalize_name(name);
    if existing.iter().any(|c| normalize_name(&c.name) == key) {
        return Err(AppError::Conflict(format!("Category {name} already exists")));
    }
    let position = existing.iter().map(|c| c.position + 1).max().unwrap_or(0);

    let model = CategoryActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        name: Set(name.to_string()),
        position: Set(position),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Category created",
        category_from_entity(model),
        Some(Meta::empty()),
    ))
}

/// Delete a category. Items that carried it lose their category and show up
/// under the default one.
pub async fn delete_category(
    state: &AppState,
    user: &HouseholdUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    let category = Categories::find_by_id(id)
        .filter(CategoryCol::UserId.eq(user.user_id))
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let key = normalize_name(&category.name);

    let lists = Lists::find()
        .filter(ListCol::UserId.eq(user.user_id))
        .lock(LockType::Update)
        .all(&txn)
        .await?;

    let mut touched = 0;
    for list in lists {
        let mut items = items_from_entity(&list)?;
        if !clear_category(&mut items, &key) {
            continue;
        }
        let mut active: ListActive = list.into();
        active.items = Set(items_to_json(&items)?);
        active.updated_at = Set(Utc::now().into());
        active.update(&txn).await?;
        touched += 1;
    }

    category.delete(&txn).await?;
    txn.commit().await?;

    tracing::debug!(category_id = %id, lists = touched, "category deleted");

    Ok(ApiResponse::success(
        "Category deleted",
        serde_json::json!({ "id": id, "lists_updated": touched }),
        Some(Meta::empty()),
    ))
}

pub async fn reorder_categories(
    state: &AppState,
    user: &HouseholdUser,
    payload: ReorderCategoriesRequest,
) -> AppResult<ApiResponse<CategoryList>> {
    let txn = state.orm.begin().await?;

    let existing = Categories::find()
        .filter(CategoryCol::UserId.eq(user.user_id))
        .lock(LockType::Update)
        .all(&txn)
        .await?;

    let known: HashSet<Uuid> = existing.iter().map(|c| c.id).collect();
    let requested: HashSet<Uuid> = payload.ids.iter().copied().collect();
    if requested.len() != payload.ids.len() || known != requested {
        return Err(AppError::BadRequest(
            "ids must list every category exactly once".into(),
        ));
    }

    let mut items = Vec::with_capacity(existing.len());
    for model in existing {
        let position = payload
            .ids
            .iter()
            .position(|id| *id == model.id)
            .unwrap_or_default() as i32;
        let mut active: CategoryActive = model.into();
        active.position = Set(position);
        items.push(category_from_entity(active.update(&txn).await?));
    }
    txn.commit().await?;

    items.sort_by_key(|c| c.position);
    Ok(ApiResponse::success(
        "Categories reordered",
        CategoryList { items },
        Some(Meta::empty()),
    ))
}

/// Clear `category_key` from every item carrying it. Returns whether anything changed.
pub fn clear_category(items: &mut [Item], category_key: &str) -> bool {
    let mut changed = false;
    for item in items.iter_mut() {
        let matches = item
            .category
            .as_deref()
            .is_some_and(|c| normalize_name(c) == category_key);
        if matches {
            item.category = None;
            changed = true;
        }
    }
    changed
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        name: model.name,
        position: model.position,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
