use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Item, ShoppingList};

/// An item as sent by clients; ids and timestamps are assigned when missing.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ItemInput {
    pub id: Option<Uuid>,
    pub name: String,
    pub category: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub current_quantity: Option<f64>,
    pub ideal_quantity: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ItemInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            category: None,
            completed: false,
            quantity: None,
            price: None,
            current_quantity: None,
            ideal_quantity: None,
            created_at: None,
        }
    }

    pub fn into_item(self) -> Item {
        let mut item = Item::new(self.name.trim());
        if let Some(id) = self.id {
            item.id = id;
        }
        if let Some(created_at) = self.created_at {
            item.created_at = created_at;
        }
        item.category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        item.completed = self.completed;
        item.quantity = self.quantity;
        item.price = self.price;
        item.current_quantity = self.current_quantity;
        item.ideal_quantity = self.ideal_quantity;
        item
    }
}

impl From<Item> for ItemInput {
    fn from(item: Item) -> Self {
        Self {
            id: Some(item.id),
            name: item.name,
            category: item.category,
            completed: item.completed,
            quantity: item.quantity,
            price: item.price,
            current_quantity: item.current_quantity,
            ideal_quantity: item.ideal_quantity,
            created_at: Some(item.created_at),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateListRequest {
    pub name: String,
    pub budget: Option<f64>,
    #[serde(default)]
    pub items: Vec<ItemInput>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateListRequest {
    pub name: Option<String>,
    pub budget: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplaceItemsRequest {
    pub items: Vec<ItemInput>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CompletePurchaseRequest {
    /// Archive the list once its purchase is merged into the pantry.
    #[serde(default)]
    pub archive: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShoppingLists {
    pub items: Vec<ShoppingList>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PurchaseSummary {
    pub list: ShoppingList,
    /// Updated pantry; absent when nothing was marked completed.
    pub pantry: Option<ShoppingList>,
    pub completed_count: usize,
    pub matched: usize,
    pub created: usize,
    pub total_value: f64,
}
