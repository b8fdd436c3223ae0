use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        categories::{CategoryList, CreateCategoryRequest, ReorderCategoriesRequest},
        history::{HistoryList, PriceHistoryList},
        lists::{
            CompletePurchaseRequest, CreateListRequest, ItemInput, PurchaseSummary,
            ReplaceItemsRequest, ShoppingLists, UpdateListRequest,
        },
        pantry::{
            GenerateListRequest, GenerateListResponse, GenerateOutcome, PantryItemView, PantryView,
        },
    },
    middleware::household::USER_HEADER,
    models::{Category, HistoryEvent, Item, ListKind, PricePoint, ShoppingList},
    pantry::{GenerationMode, StockStatus, StockTier},
    response::{ApiResponse, Meta},
    routes::{categories, health, history, lists, pantry, params},
};

struct HouseholdAddon;

impl Modify for HouseholdAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "household",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(USER_HEADER))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        lists::list_lists,
        lists::create_list,
        lists::get_list,
        lists::update_list,
        lists::replace_items,
        lists::archive_list,
        lists::restore_list,
        lists::delete_list,
        lists::complete_purchase,
        pantry::get_pantry,
        pantry::replace_pantry_items,
        pantry::generate_list,
        pantry::lookup_item,
        categories::list_categories,
        categories::create_category,
        categories::reorder_categories,
        categories::delete_category,
        history::list_history,
        history::price_history
    ),
    components(
        schemas(
            Item,
            ItemInput,
            ListKind,
            ShoppingList,
            Category,
            HistoryEvent,
            PricePoint,
            StockTier,
            StockStatus,
            GenerationMode,
            GenerateOutcome,
            CreateListRequest,
            UpdateListRequest,
            ReplaceItemsRequest,
            CompletePurchaseRequest,
            PurchaseSummary,
            ShoppingLists,
            PantryItemView,
            PantryView,
            GenerateListRequest,
            GenerateListResponse,
            CreateCategoryRequest,
            ReorderCategoriesRequest,
            CategoryList,
            HistoryList,
            PriceHistoryList,
            params::Pagination,
            params::ItemSort,
            Meta,
            ApiResponse<ShoppingList>,
            ApiResponse<ShoppingLists>,
            ApiResponse<PantryView>,
            ApiResponse<PurchaseSummary>,
            ApiResponse<GenerateListResponse>
        )
    ),
    security(
        ("household" = [])
    ),
    modifiers(&HouseholdAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Lists", description = "Shopping lists and purchases"),
        (name = "Pantry", description = "Pantry stock and list generation"),
        (name = "Categories", description = "User-defined item categories"),
        (name = "History", description = "Activity and price history"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
