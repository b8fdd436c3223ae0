use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stock ratio below which a non-empty item counts as critical.
pub const DEFAULT_CRITICAL_RATIO: f64 = 0.35;

/// Health tier of a pantry item, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockTier {
    /// Nothing left ("Esgotado").
    OutOfStock,
    /// Some left, but under the critical ratio ("Crítico").
    Critical,
    /// Under ideal, not critical ("Baixo").
    Low,
    /// At or above ideal.
    Ideal,
}

impl StockTier {
    pub fn is_critical(&self) -> bool {
        matches!(self, StockTier::OutOfStock | StockTier::Critical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StockStatus {
    pub tier: StockTier,
    pub ratio: f64,
    /// `ideal - current` after normalization; positive means something should be bought.
    pub deficit: f64,
}

impl StockStatus {
    pub fn needs_restock(&self) -> bool {
        self.deficit > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPolicy {
    pub critical_ratio: f64,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            critical_ratio: DEFAULT_CRITICAL_RATIO,
        }
    }
}

impl ThresholdPolicy {
    pub fn new(critical_ratio: f64) -> Self {
        Self { critical_ratio }
    }

    /// Classify raw stored values. Missing or negative stock counts as 0,
    /// missing or non-positive ideals count as 1.
    pub fn classify(&self, current: Option<f64>, ideal: Option<f64>) -> StockStatus {
        let current = normalize_current(current);
        let ideal = normalize_ideal(ideal);
        let ratio = current / ideal;

        let tier = if current <= 0.0 {
            StockTier::OutOfStock
        } else if ratio < self.critical_ratio {
            StockTier::Critical
        } else if ratio < 1.0 {
            StockTier::Low
        } else {
            StockTier::Ideal
        };

        StockStatus {
            tier,
            ratio,
            deficit: ideal - current,
        }
    }
}

/// Classify with the default 35% critical threshold.
pub fn classify_stock(current: f64, ideal: f64) -> StockStatus {
    ThresholdPolicy::default().classify(Some(current), Some(ideal))
}

pub(crate) fn normalize_current(current: Option<f64>) -> f64 {
    match current {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

fn normalize_ideal(ideal: Option<f64>) -> f64 {
    match ideal {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => 1.0,
    }
}
