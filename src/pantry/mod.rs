//! Pantry/list reconciliation rules.
//!
//! Everything in here is pure computation over item snapshots: no storage,
//! no users, no I/O. Inputs are borrowed and never mutated; every operation
//! returns a new collection for the caller to persist.

pub mod generator;
pub mod lifecycle;
pub mod matching;
pub mod reconcile;
pub mod stock;

pub use generator::{GenerationMode, ListGenerator, generate_shopping_list};
pub use lifecycle::{ListStatus, TransitionError};
pub use matching::{NameNormalizer, TrimLowercase, find_exact, find_fuzzy, normalize_name};
pub use reconcile::{
    BASELINE_IDEAL_EQUALS_INITIAL_PURCHASE, BaselinePolicy, Reconciler, Reconciliation,
    reconcile_purchase,
};
pub use stock::{DEFAULT_CRITICAL_RATIO, StockStatus, StockTier, ThresholdPolicy, classify_stock};
