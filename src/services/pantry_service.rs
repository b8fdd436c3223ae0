use chrono::Utc;
use sea_orm::sea_query::{LockType, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::{
        lists::{CompletePurchaseRequest, PurchaseSummary, ReplaceItemsRequest},
        pantry::{
            GenerateListRequest, GenerateListResponse, GenerateOutcome, LookupQuery,
            PantryItemView, PantryView,
        },
    },
    entity::{
        lists::{ActiveModel as ListActive, Column as ListCol, Entity as Lists, Model as ListModel},
        price_history::{ActiveModel as PriceActive, Entity as PriceHistory},
    },
    error::{AppError, AppResult},
    history::{self, LIST_GENERATED, PURCHASE_COMPLETED},
    middleware::household::HouseholdUser,
    models::{Item, ListKind},
    pantry::{ListStatus, Reconciler, TrimLowercase, find_fuzzy, normalize_name},
    response::{ApiResponse, Meta},
    services::{
        find_owned_list, items_from_entity, items_to_json, list_from_entity,
        list_service::insert_list, validate_items,
    },
    state::{AppState, PantrySettings},
};

pub const PANTRY_NAME: &str = "Pantry";

pub async fn get_pantry(
    state: &AppState,
    user: &HouseholdUser,
) -> AppResult<ApiResponse<PantryView>> {
    let pantry = load_or_create_pantry(&state.orm, user.user_id, false).await?;
    let view = pantry_view(pantry, &state.settings)?;
    Ok(ApiResponse::success("Pantry", view, Some(Meta::empty())))
}

/// Replace every pantry item at once.
pub async fn replace_pantry_items(
    state: &AppState,
    user: &HouseholdUser,
    payload: ReplaceItemsRequest,
) -> AppResult<ApiResponse<PantryView>> {
    let items = validate_items(payload.items)?;

    let txn = state.orm.begin().await?;
    let pantry = load_or_create_pantry(&txn, user.user_id, true).await?;
    let mut active: ListActive = pantry.into();
    active.items = Set(items_to_json(&items)?);
    active.updated_at = Set(Utc::now().into());
    let pantry = active.update(&txn).await?;
    txn.commit().await?;

    let view = pantry_view(pantry, &state.settings)?;
    Ok(ApiResponse::success("Pantry updated", view, Some(Meta::empty())))
}

/// Build a shopping list from pantry deficits. Nothing is created when no
/// item qualifies; the response says so instead.
pub async fn generate_list(
    state: &AppState,
    user: &HouseholdUser,
    payload: GenerateListRequest,
) -> AppResult<ApiResponse<GenerateListResponse>> {
    let pantry = load_or_create_pantry(&state.orm, user.user_id, false).await?;
    let pantry_items = items_from_entity(&pantry)?;
    let items = state.settings.generator().generate(&pantry_items, payload.mode);

    if items.is_empty() {
        tracing::debug!(mode = ?payload.mode, "pantry needs nothing");
        return Ok(ApiResponse::success(
            "Nothing to buy",
            GenerateListResponse {
                outcome: GenerateOutcome::NothingToBuy,
                list: None,
            },
            Some(Meta::empty()),
        ));
    }

    let name = replenish_list_name(&state.settings.replenish_list_prefix);
    let list = insert_list(state, user.user_id, &name, None, &items).await?;
    tracing::info!(list_id = %list.id, items = items.len(), mode = ?payload.mode, "shopping list generated");

    history::record(
        &state.pool,
        user.user_id,
        LIST_GENERATED,
        Some(list.id),
        serde_json::json!({ "item_count": items.len(), "mode": payload.mode }),
    )
    .await;

    Ok(ApiResponse::success(
        "List generated",
        GenerateListResponse {
            outcome: GenerateOutcome::Created,
            list: Some(list),
        },
        Some(Meta::empty()),
    ))
}

/// Finish a purchase: merge the completed items of a list into the pantry.
///
/// The list and the pantry rows stay locked until commit, so purchases
/// against the same pantry are applied one after another.
pub async fn complete_purchase(
    state: &AppState,
    user: &HouseholdUser,
    list_id: Uuid,
    payload: CompletePurchaseRequest,
) -> AppResult<ApiResponse<PurchaseSummary>> {
    let txn = state.orm.begin().await?;

    let list = find_owned_list(&txn, user.user_id, list_id, true).await?;
    if list.kind != ListKind::List.as_str() {
        return Err(AppError::BadRequest(
            "Only shopping lists can be completed".into(),
        ));
    }
    let status = ListStatus::from_archived(list.archived);
    status.ensure_mutable()?;

    let purchased = items_from_entity(&list)?;
    let completed: Vec<&Item> = purchased.iter().filter(|item| item.completed).collect();

    if completed.is_empty() {
        txn.commit().await?;
        return Ok(ApiResponse::success(
            "Nothing to reconcile",
            PurchaseSummary {
                list: list_from_entity(list)?,
                pantry: None,
                completed_count: 0,
                matched: 0,
                created: 0,
                total_value: 0.0,
            },
            Some(Meta::empty()),
        ));
    }

    let completed_count = completed.len();
    let total_value: f64 = completed.iter().filter_map(|item| item.line_total()).sum();

    let pantry = load_or_create_pantry(&txn, user.user_id, true).await?;
    let pantry_items = items_from_entity(&pantry)?;
    let reconciliation = Reconciler::new().reconcile(&purchased, &pantry_items);

    let mut pantry_active: ListActive = pantry.into();
    pantry_active.items = Set(items_to_json(&reconciliation.items)?);
    pantry_active.updated_at = Set(Utc::now().into());
    let pantry = pantry_active.update(&txn).await?;

    let price_points: Vec<PriceActive> = completed
        .iter()
        .filter_map(|item| {
            item.price.map(|price| PriceActive {
                id: Set(Uuid::new_v4()),
                user_id: Set(user.user_id),
                name: Set(item.name.trim().to_string()),
                normalized_name: Set(normalize_name(&item.name)),
                price: Set(price),
                list_id: Set(Some(list_id)),
                recorded_at: Set(Utc::now().into()),
            })
        })
        .collect();
    if !price_points.is_empty() {
        PriceHistory::insert_many(price_points).exec(&txn).await?;
    }

    let list = if payload.archive {
        let mut list_active: ListActive = list.into();
        list_active.archived = Set(status.archive()?.is_archived());
        list_active.updated_at = Set(Utc::now().into());
        list_active.update(&txn).await?
    } else {
        list
    };

    txn.commit().await?;

    tracing::info!(
        list_id = %list_id,
        completed = completed_count,
        matched = reconciliation.matched,
        created = reconciliation.created,
        "purchase reconciled into pantry"
    );

    history::record(
        &state.pool,
        user.user_id,
        PURCHASE_COMPLETED,
        Some(list_id),
        serde_json::json!({
            "item_count": completed_count,
            "total_value": total_value,
            "archived": payload.archive,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Purchase completed",
        PurchaseSummary {
            list: list_from_entity(list)?,
            pantry: Some(list_from_entity(pantry)?),
            completed_count,
            matched: reconciliation.matched,
            created: reconciliation.created,
            total_value,
        },
        Some(Meta::empty()),
    ))
}

/// Free-text lookup of a pantry item, tolerant of partial names.
pub async fn lookup_item(
    state: &AppState,
    user: &HouseholdUser,
    query: LookupQuery,
) -> AppResult<ApiResponse<PantryItemView>> {
    let pantry = load_or_create_pantry(&state.orm, user.user_id, false).await?;
    let items = items_from_entity(&pantry)?;
    let idx = find_fuzzy(&items, &query.name, &TrimLowercase).ok_or(AppError::NotFound)?;

    let item = items[idx].clone();
    let status = state
        .settings
        .thresholds
        .classify(item.current_quantity, item.ideal_quantity);
    let category_label = item.category_or(&state.settings.default_category).to_string();
    Ok(ApiResponse::success(
        "OK",
        PantryItemView {
            item,
            category_label,
            status,
        },
        Some(Meta::empty()),
    ))
}

/// Fetch the user's pantry, creating it on first access.
pub(crate) async fn load_or_create_pantry<C>(
    conn: &C,
    user_id: Uuid,
    lock: bool,
) -> AppResult<ListModel>
where
    C: ConnectionTrait,
{
    if let Some(pantry) = find_pantry(conn, user_id, lock).await? {
        return Ok(pantry);
    }

    // One pantry per user is enforced by a unique index; a lost race is a no-op insert.
    let pantry = ListActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        name: Set(PANTRY_NAME.to_string()),
        kind: Set(ListKind::Pantry.as_str().to_string()),
        archived: Set(false),
        budget: Set(None),
        items: Set(serde_json::json!([])),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };
    Lists::insert(pantry)
        .on_conflict(OnConflict::new().do_nothing().to_owned())
        .exec_without_returning(conn)
        .await?;
    tracing::debug!(user_id = %user_id, "pantry created");

    find_pantry(conn, user_id, lock)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("pantry missing after insert")))
}

async fn find_pantry<C>(conn: &C, user_id: Uuid, lock: bool) -> AppResult<Option<ListModel>>
where
    C: ConnectionTrait,
{
    let mut finder = Lists::find().filter(
        Condition::all()
            .add(ListCol::UserId.eq(user_id))
            .add(ListCol::Kind.eq(ListKind::Pantry.as_str())),
    );
    if lock {
        finder = finder.lock(LockType::Update);
    }
    Ok(finder.one(conn).await?)
}

fn pantry_view(model: ListModel, settings: &PantrySettings) -> AppResult<PantryView> {
    let list = list_from_entity(model)?;
    let items = list
        .items
        .into_iter()
        .map(|item| {
            let status = settings
                .thresholds
                .classify(item.current_quantity, item.ideal_quantity);
            let category_label = item.category_or(&settings.default_category).to_string();
            PantryItemView {
                item,
                category_label,
                status,
            }
        })
        .collect();
    Ok(PantryView {
        id: list.id,
        name: list.name,
        items,
        updated_at: list.updated_at,
    })
}

pub fn replenish_list_name(prefix: &str) -> String {
    format!("{} {}", prefix, Utc::now().format("%Y-%m-%d"))
}
