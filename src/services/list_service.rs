use std::cmp::Ordering;

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::lists::{CreateListRequest, ReplaceItemsRequest, ShoppingLists, UpdateListRequest},
    entity::{
        categories::{Column as CategoryCol, Entity as Categories},
        lists::{ActiveModel as ListActive, Column as ListCol, Entity as Lists, Model as ListModel},
    },
    error::{AppError, AppResult},
    history::{self, LIST_ARCHIVED, LIST_RESTORED},
    middleware::household::HouseholdUser,
    models::{Item, ListKind, ShoppingList},
    pantry::{ListStatus, normalize_name},
    response::{ApiResponse, Meta},
    routes::params::{ItemSort, ListDetailQuery, ListQuery, SortOrder},
    services::{find_owned_list, items_to_json, list_from_entity, validate_items},
    state::AppState,
};

pub async fn list_lists(
    state: &AppState,
    user: &HouseholdUser,
    query: ListQuery,
) -> AppResult<ApiResponse<ShoppingLists>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all()
        .add(ListCol::UserId.eq(user.user_id))
        .add(ListCol::Kind.eq(ListKind::List.as_str()));
    if let Some(archived) = query.archived {
        condition = condition.add(ListCol::Archived.eq(archived));
    }

    let mut finder = Lists::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(ListCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(ListCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(list_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Lists", ShoppingLists { items }, Some(meta)))
}

pub async fn create_list(
    state: &AppState,
    user: &HouseholdUser,
    payload: CreateListRequest,
) -> AppResult<ApiResponse<ShoppingList>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    validate_budget(payload.budget)?;
    let items = validate_items(payload.items)?;

    let list = insert_list(state, user.user_id, name, payload.budget, &items).await?;
    tracing::debug!(list_id = %list.id, items = list.items.len(), "list created");

    Ok(ApiResponse::success("List created", list, Some(Meta::empty())))
}

pub async fn get_list(
    state: &AppState,
    user: &HouseholdUser,
    id: Uuid,
    query: ListDetailQuery,
) -> AppResult<ApiResponse<ShoppingList>> {
    let model = find_owned_list(&state.orm, user.user_id, id, false).await?;
    let mut list = list_from_entity(model)?;

    let sort = query.sort.unwrap_or_default();
    let category_order = if sort == ItemSort::Category {
        category_names(state, user.user_id).await?
    } else {
        Vec::new()
    };
    sort_items(&mut list.items, sort, &category_order);
    label_uncategorized(&mut list.items, &state.settings.default_category);

    Ok(ApiResponse::success("OK", list, Some(Meta::empty())))
}

pub async fn update_list(
    state: &AppState,
    user: &HouseholdUser,
    id: Uuid,
    payload: UpdateListRequest,
) -> AppResult<ApiResponse<ShoppingList>> {
    let name = match payload.name {
        Some(name) if name.trim().is_empty() => {
            return Err(AppError::BadRequest("name must not be empty".into()));
        }
        Some(name) => Some(name.trim().to_string()),
        None => None,
    };
    validate_budget(payload.budget)?;

    // Locked so a concurrent archive cannot slip in between check and write.
    let txn = state.orm.begin().await?;
    let existing = find_owned_list(&txn, user.user_id, id, true).await?;
    ensure_shopping_list(&existing, "edited here")?;
    ListStatus::from_archived(existing.archived).ensure_mutable()?;

    let mut active: ListActive = existing.into();
    if let Some(name) = name {
        active.name = Set(name);
    }
    if payload.budget.is_some() {
        active.budget = Set(payload.budget);
    }
    active.updated_at = Set(Utc::now().into());
    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(ApiResponse::success(
        "List updated",
        list_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

/// Replace every item of a list at once.
pub async fn replace_items(
    state: &AppState,
    user: &HouseholdUser,
    id: Uuid,
    payload: ReplaceItemsRequest,
) -> AppResult<ApiResponse<ShoppingList>> {
    let items = validate_items(payload.items)?;

    let txn = state.orm.begin().await?;
    let existing = find_owned_list(&txn, user.user_id, id, true).await?;
    ensure_shopping_list(&existing, "edited here")?;
    ListStatus::from_archived(existing.archived).ensure_mutable()?;

    let mut active: ListActive = existing.into();
    active.items = Set(items_to_json(&items)?);
    active.updated_at = Set(Utc::now().into());
    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(ApiResponse::success(
        "Items updated",
        list_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

pub async fn archive_list(
    state: &AppState,
    user: &HouseholdUser,
    id: Uuid,
) -> AppResult<ApiResponse<ShoppingList>> {
    transition(state, user, id, ListStatus::archive, LIST_ARCHIVED).await
}

pub async fn restore_list(
    state: &AppState,
    user: &HouseholdUser,
    id: Uuid,
) -> AppResult<ApiResponse<ShoppingList>> {
    transition(state, user, id, ListStatus::restore, LIST_RESTORED).await
}

pub async fn delete_list(
    state: &AppState,
    user: &HouseholdUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let existing = find_owned_list(&state.orm, user.user_id, id, false).await?;
    ensure_shopping_list(&existing, "deleted")?;
    existing.delete(&state.orm).await?;

    Ok(ApiResponse::success(
        "List deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

/// Order items for display. Category order follows `category_order`; items
/// whose category is absent or unknown go last. Ties fall back to name.
pub fn sort_items(items: &mut [Item], sort: ItemSort, category_order: &[String]) {
    match sort {
        ItemSort::Recent => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        ItemSort::Name => items.sort_by_key(|item| normalize_name(&item.name)),
        ItemSort::Category => {
            let rank = |item: &Item| {
                item.category
                    .as_deref()
                    .map(normalize_name)
                    .and_then(|c| category_order.iter().position(|known| normalize_name(known) == c))
                    .unwrap_or(usize::MAX)
            };
            items.sort_by(|a, b| match rank(a).cmp(&rank(b)) {
                Ordering::Equal => normalize_name(&a.name).cmp(&normalize_name(&b.name)),
                other => other,
            });
        }
    }
}

/// Show items without a category under `sentinel`.
pub fn label_uncategorized(items: &mut [Item], sentinel: &str) {
    for item in items.iter_mut() {
        let label = item.category_or(sentinel).to_string();
        item.category = Some(label);
    }
}

pub(crate) async fn insert_list(
    state: &AppState,
    user_id: Uuid,
    name: &str,
    budget: Option<f64>,
    items: &[Item],
) -> AppResult<ShoppingList> {
    let now = Utc::now();
    let model = ListActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        name: Set(name.to_string()),
        kind: Set(ListKind::List.as_str().to_string()),
        archived: Set(false),
        budget: Set(budget),
        items: Set(items_to_json(items)?),
        created_at: Set(now.into()),
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    list_from_entity(model)
}

async fn category_names(state: &AppState, user_id: Uuid) -> AppResult<Vec<String>> {
    let names = Categories::find()
        .filter(CategoryCol::UserId.eq(user_id))
        .order_by_asc(CategoryCol::Position)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    Ok(names)
}

async fn transition<F>(
    state: &AppState,
    user: &HouseholdUser,
    id: Uuid,
    step: F,
    action: &str,
) -> AppResult<ApiResponse<ShoppingList>>
where
    F: FnOnce(ListStatus) -> Result<ListStatus, crate::pantry::TransitionError>,
{
    let txn = state.orm.begin().await?;
    let existing = find_owned_list(&txn, user.user_id, id, true).await?;
    ensure_shopping_list(&existing, "archived")?;
    let next = step(ListStatus::from_archived(existing.archived))?;

    let mut active: ListActive = existing.into();
    active.archived = Set(next.is_archived());
    active.updated_at = Set(Utc::now().into());
    let model = active.update(&txn).await?;
    txn.commit().await?;

    history::record(
        &state.pool,
        user.user_id,
        action,
        Some(model.id),
        serde_json::json!({ "name": model.name }),
    )
    .await;

    Ok(ApiResponse::success(
        "List updated",
        list_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

/// The pantry has its own endpoints and no lifecycle.
fn ensure_shopping_list(model: &ListModel, action: &str) -> AppResult<()> {
    if model.kind == ListKind::Pantry.as_str() {
        return Err(AppError::BadRequest(format!("The pantry cannot be {action}")));
    }
    Ok(())
}

fn validate_budget(budget: Option<f64>) -> AppResult<()> {
    match budget {
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(AppError::BadRequest("budget must not be negative".into()))
        }
        _ => Ok(()),
    }
}
