use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Item;

use super::stock::{StockStatus, ThresholdPolicy};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Only out-of-stock and critical items.
    #[default]
    Critical,
    /// Everything below its ideal level.
    All,
}

impl GenerationMode {
    pub fn includes(&self, status: &StockStatus) -> bool {
        if !status.needs_restock() {
            return false;
        }
        match self {
            GenerationMode::Critical => status.tier.is_critical(),
            GenerationMode::All => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListGenerator {
    policy: ThresholdPolicy,
}

impl ListGenerator {
    pub fn new(policy: ThresholdPolicy) -> Self {
        Self { policy }
    }

    /// Build shopping-list items for every pantry item `mode` selects, in
    /// pantry order. Each new item asks for exactly the deficit.
    ///
    /// An empty result means there is nothing to buy; callers must not turn
    /// it into an empty list.
    pub fn generate(&self, pantry: &[Item], mode: GenerationMode) -> Vec<Item> {
        pantry
            .iter()
            .filter_map(|entry| {
                let status = self
                    .policy
                    .classify(entry.current_quantity, entry.ideal_quantity);
                mode.includes(&status).then(|| {
                    Item::new(entry.name.clone())
                        .with_category(entry.category.clone())
                        .with_quantity(status.deficit)
                })
            })
            .collect()
    }
}

pub fn generate_shopping_list(pantry: &[Item], mode: GenerationMode) -> Vec<Item> {
    ListGenerator::default().generate(pantry, mode)
}
