use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{HistoryEvent, PricePoint};

#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryList {
    pub items: Vec<HistoryEvent>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PriceHistoryList {
    pub items: Vec<PricePoint>,
}
