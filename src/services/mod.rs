pub mod category_service;
pub mod history_service;
pub mod list_service;
pub mod pantry_service;

use chrono::Utc;
use sea_orm::sea_query::LockType;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};
use uuid::Uuid;

use crate::{
    dto::lists::ItemInput,
    entity::lists::{Column as ListCol, Entity as Lists, Model as ListModel},
    error::{AppError, AppResult},
    models::{Item, ListKind, ShoppingList},
};

pub(crate) fn list_from_entity(model: ListModel) -> AppResult<ShoppingList> {
    let kind = ListKind::parse(&model.kind).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("unknown list kind {:?}", model.kind))
    })?;
    Ok(ShoppingList {
        id: model.id,
        user_id: model.user_id,
        name: model.name,
        kind,
        archived: model.archived,
        budget: model.budget,
        items: serde_json::from_value(model.items)?,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

pub(crate) fn items_to_json(items: &[Item]) -> AppResult<serde_json::Value> {
    Ok(serde_json::to_value(items)?)
}

pub(crate) fn items_from_entity(model: &ListModel) -> AppResult<Vec<Item>> {
    Ok(serde_json::from_value(model.items.clone())?)
}

/// Validate a full replacement item array and assign missing ids and timestamps.
pub fn validate_items(inputs: Vec<ItemInput>) -> AppResult<Vec<Item>> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(idx, input)| {
            if input.name.trim().is_empty() {
                return Err(AppError::BadRequest(format!("item {idx}: name is required")));
            }
            if let Some(quantity) = input.quantity {
                if !quantity.is_finite() || quantity <= 0.0 {
                    return Err(AppError::BadRequest(format!(
                        "item {idx}: quantity must be greater than 0"
                    )));
                }
            }
            if let Some(price) = input.price {
                if !price.is_finite() || price < 0.0 {
                    return Err(AppError::BadRequest(format!(
                        "item {idx}: price must not be negative"
                    )));
                }
            }
            let stock_is_finite = [input.current_quantity, input.ideal_quantity]
                .into_iter()
                .flatten()
                .all(f64::is_finite);
            if !stock_is_finite {
                return Err(AppError::BadRequest(format!(
                    "item {idx}: stock quantities must be finite"
                )));
            }
            Ok(input.into_item())
        })
        .collect()
}

/// Fetch a list owned by `user_id`, optionally row-locked for the rest of the transaction.
pub(crate) async fn find_owned_list<C>(
    conn: &C,
    user_id: Uuid,
    id: Uuid,
    lock: bool,
) -> AppResult<ListModel>
where
    C: ConnectionTrait,
{
    let mut finder = Lists::find().filter(
        Condition::all()
            .add(ListCol::UserId.eq(user_id))
            .add(ListCol::Id.eq(id)),
    );
    if lock {
        finder = finder.lock(LockType::Update);
    }
    finder.one(conn).await?.ok_or(AppError::NotFound)
}
