use axum::Router;

use crate::state::AppState;

pub mod categories;
pub mod doc;
pub mod health;
pub mod history;
pub mod lists;
pub mod pantry;
pub mod params;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/lists", lists::router())
        .nest("/pantry", pantry::router())
        .nest("/categories", categories::router())
        .merge(history::router())
}
