use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// Quantity assumed when an item carries none.
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// A product, either something to buy (shopping list) or something stocked (pantry).
///
/// The same shape is used in both contexts. `quantity` is only meaningful on a
/// shopping list, `current_quantity`/`ideal_quantity` only in the pantry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_quantity: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// A fresh shopping-list item with the default quantity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: None,
            completed: false,
            quantity: Some(DEFAULT_QUANTITY),
            price: None,
            current_quantity: None,
            ideal_quantity: None,
            created_at: Utc::now(),
        }
    }

    /// A fresh pantry entry holding `current` against a target of `ideal`.
    pub fn stocked(name: impl Into<String>, current: f64, ideal: Option<f64>) -> Self {
        Self {
            quantity: None,
            current_quantity: Some(current),
            ideal_quantity: ideal,
            ..Self::new(name)
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    pub fn quantity_or_default(&self) -> f64 {
        self.quantity.unwrap_or(DEFAULT_QUANTITY)
    }

    /// Category shown to the user; absent categories fall back to `sentinel`.
    pub fn category_or<'a>(&'a self, sentinel: &'a str) -> &'a str {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(sentinel)
    }

    /// Price paid for the whole line, when a unit price was recorded.
    pub fn line_total(&self) -> Option<f64> {
        self.price.map(|p| p * self.quantity_or_default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    List,
    Pantry,
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::List => "list",
            ListKind::Pantry => "pantry",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "list" => Some(ListKind::List),
            "pantry" => Some(ListKind::Pantry),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShoppingList {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub kind: ListKind,
    pub archived: bool,
    pub budget: Option<f64>,
    pub items: Vec<Item>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryEvent {
    pub id: Uuid,
    pub action: String,
    pub list_id: Option<Uuid>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PricePoint {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub list_id: Option<Uuid>,
    pub recorded_at: DateTime<Utc>,
}
