pub mod categories;
pub mod history;
pub mod lists;
pub mod pantry;
