use crate::models::Item;

use super::matching::{NameNormalizer, TrimLowercase, find_exact};
use super::stock::normalize_current;

/// A newly seen product takes the quantity just bought as its ideal stock level.
///
/// This is a default, not a measured target; users are expected to adjust it.
pub const BASELINE_IDEAL_EQUALS_INITIAL_PURCHASE: bool = true;

/// How the ideal level of a pantry entry created by a purchase is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BaselinePolicy {
    /// Ideal equals the first purchased quantity.
    InitialPurchase,
    /// Leave the ideal unset; classification then treats it as 1.
    Unset,
}

impl Default for BaselinePolicy {
    fn default() -> Self {
        if BASELINE_IDEAL_EQUALS_INITIAL_PURCHASE {
            BaselinePolicy::InitialPurchase
        } else {
            BaselinePolicy::Unset
        }
    }
}

impl BaselinePolicy {
    pub fn ideal_for(&self, bought: f64) -> Option<f64> {
        match self {
            BaselinePolicy::InitialPurchase => Some(bought),
            BaselinePolicy::Unset => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub items: Vec<Item>,
    /// Purchased lines folded into an existing pantry entry.
    pub matched: usize,
    /// Pantry entries created for products not seen before.
    pub created: usize,
}

impl Reconciliation {
    pub fn is_noop(&self) -> bool {
        self.matched == 0 && self.created == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Reconciler<N = TrimLowercase> {
    normalizer: N,
    baseline: BaselinePolicy,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: NameNormalizer> Reconciler<N> {
    pub fn with_normalizer(normalizer: N) -> Self {
        Self {
            normalizer,
            baseline: BaselinePolicy::default(),
        }
    }

    pub fn baseline(mut self, baseline: BaselinePolicy) -> Self {
        self.baseline = baseline;
        self
    }

    /// Merge the completed lines of `purchased` into a copy of `pantry`.
    ///
    /// Lines are applied in order against one evolving snapshot, so two lines
    /// for the same product land on the same entry, including an entry created
    /// earlier in the same batch. Calling this twice for one purchase counts
    /// it twice.
    pub fn reconcile(&self, purchased: &[Item], pantry: &[Item]) -> Reconciliation {
        let mut items = pantry.to_vec();
        let mut matched = 0;
        let mut created = 0;

        for bought in purchased.iter().filter(|item| item.completed) {
            let quantity = bought.quantity_or_default();
            match find_exact(&items, &bought.name, &self.normalizer) {
                Some(idx) => {
                    let entry = &mut items[idx];
                    // Stored stock below zero counts as empty.
                    let stored = normalize_current(entry.current_quantity);
                    entry.current_quantity = Some(stored + quantity);
                    matched += 1;
                }
                None => {
                    items.push(
                        Item::stocked(bought.name.clone(), quantity, self.baseline.ideal_for(quantity))
                            .with_category(bought.category.clone()),
                    );
                    created += 1;
                }
            }
        }

        Reconciliation {
            items,
            matched,
            created,
        }
    }
}

pub fn reconcile_purchase(completed: &[Item], pantry: &[Item]) -> Vec<Item> {
    Reconciler::new().reconcile(completed, pantry).items
}
