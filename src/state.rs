use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn},
    pantry::{ListGenerator, ThresholdPolicy},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub settings: PantrySettings,
}

/// Domain knobs taken from configuration.
#[derive(Debug, Clone)]
pub struct PantrySettings {
    pub thresholds: ThresholdPolicy,
    pub default_category: String,
    pub replenish_list_prefix: String,
}

impl PantrySettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            thresholds: ThresholdPolicy::new(config.critical_ratio),
            default_category: config.default_category.clone(),
            replenish_list_prefix: config.replenish_list_prefix.clone(),
        }
    }

    pub fn generator(&self) -> ListGenerator {
        ListGenerator::new(self.thresholds)
    }
}

impl Default for PantrySettings {
    fn default() -> Self {
        Self {
            thresholds: ThresholdPolicy::default(),
            default_category: "Other".to_string(),
            replenish_list_prefix: "Replenishment".to_string(),
        }
    }
}
