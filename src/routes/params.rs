use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Display order for the items of one list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemSort {
    /// Newest first.
    #[default]
    Recent,
    Name,
    /// By the user's category order, uncategorized last.
    Category,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub archived: Option<bool>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ListDetailQuery {
    pub sort: Option<ItemSort>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct HistoryQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub action: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PriceQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub name: String,
}

// `serde(flatten)` breaks numeric fields in query strings; paging is repeated per query.
macro_rules! paged {
    ($($query:ty),*) => {$(
        impl $query {
            pub fn pagination(&self) -> Pagination {
                Pagination {
                    page: self.page,
                    per_page: self.per_page,
                }
            }
        }
    )*};
}

paged!(ListQuery, HistoryQuery, PriceQuery);
