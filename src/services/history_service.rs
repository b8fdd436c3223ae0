use chrono::Utc;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    dto::history::{HistoryList, PriceHistoryList},
    entity::{
        history_events::{Column as HistoryCol, Entity as HistoryEvents, Model as HistoryModel},
        price_history::{Column as PriceCol, Entity as PriceHistory, Model as PriceModel},
    },
    error::{AppError, AppResult},
    middleware::household::HouseholdUser,
    models::{HistoryEvent, PricePoint},
    pantry::normalize_name,
    response::{ApiResponse, Meta},
    routes::params::{HistoryQuery, PriceQuery},
    state::AppState,
};

pub async fn list_history(
    state: &AppState,
    user: &HouseholdUser,
    query: HistoryQuery,
) -> AppResult<ApiResponse<HistoryList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all().add(HistoryCol::UserId.eq(user.user_id));
    if let Some(action) = query.action.as_ref().filter(|a| !a.is_empty()) {
        condition = condition.add(HistoryCol::Action.eq(action.clone()));
    }

    let finder = HistoryEvents::find()
        .filter(condition)
        .order_by_desc(HistoryCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(history_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("History", HistoryList { items }, Some(meta)))
}

/// Prices paid for one product, newest first. Names match after normalization.
pub async fn price_history(
    state: &AppState,
    user: &HouseholdUser,
    query: PriceQuery,
) -> AppResult<ApiResponse<PriceHistoryList>> {
    let key = normalize_name(&query.name);
    if key.is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    let (page, limit, offset) = query.pagination().normalize();

    let finder = PriceHistory::find()
        .filter(
            Condition::all()
                .add(PriceCol::UserId.eq(user.user_id))
                .add(PriceCol::NormalizedName.eq(key)),
        )
        .order_by_desc(PriceCol::RecordedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(price_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Prices", PriceHistoryList { items }, Some(meta)))
}

fn history_from_entity(model: HistoryModel) -> HistoryEvent {
    HistoryEvent {
        id: model.id,
        action: model.action,
        list_id: model.list_id,
        metadata: model.metadata,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn price_from_entity(model: PriceModel) -> PricePoint {
    PricePoint {
        id: model.id,
        name: model.name,
        price: model.price,
        list_id: model.list_id,
        recorded_at: model.recorded_at.with_timezone(&Utc),
    }
}
