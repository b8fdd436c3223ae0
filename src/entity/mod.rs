pub mod categories;
pub mod history_events;
pub mod lists;
pub mod price_history;

pub use categories::Entity as Categories;
pub use history_events::Entity as HistoryEvents;
pub use lists::Entity as Lists;
pub use price_history::Entity as PriceHistory;
