use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::{Item, ShoppingList},
    pantry::{GenerationMode, StockStatus},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct PantryItemView {
    #[serde(flatten)]
    pub item: Item,
    /// `category`, or the default category when the item has none.
    pub category_label: String,
    pub status: StockStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PantryView {
    pub id: Uuid,
    pub name: String,
    pub items: Vec<PantryItemView>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GenerateListRequest {
    #[serde(default)]
    pub mode: GenerationMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GenerateOutcome {
    Created,
    NothingToBuy,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateListResponse {
    pub outcome: GenerateOutcome,
    pub list: Option<ShoppingList>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LookupQuery {
    pub name: String,
}
