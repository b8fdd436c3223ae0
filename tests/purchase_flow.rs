use pantry_api::{
    db::{create_pool, orm_from_pool, run_migrations},
    dto::{
        categories::CreateCategoryRequest,
        lists::{
            CompletePurchaseRequest, CreateListRequest, ItemInput, ReplaceItemsRequest,
            UpdateListRequest,
        },
        pantry::{GenerateListRequest, GenerateOutcome},
    },
    error::AppError,
    history::PURCHASE_COMPLETED,
    middleware::household::HouseholdUser,
    pantry::{GenerationMode, StockTier},
    routes::params::{HistoryQuery, PriceQuery},
    services::{category_service, history_service, list_service, pantry_service},
    state::{AppState, PantrySettings},
};
use tokio::sync::Mutex;
use uuid::Uuid;

// Tests run in parallel; only one of them applies migrations.
static MIGRATED: Mutex<bool> = Mutex::const_new(false);

// Integration flow: stock the pantry -> generate a list -> shop -> complete the purchase.
#[tokio::test]
async fn generate_shop_and_reconcile_flow() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = HouseholdUser {
        user_id: Uuid::new_v4(),
    };

    pantry_service::replace_pantry_items(
        &state,
        &user,
        ReplaceItemsRequest {
            items: vec![
                stock("Rice", 0.0, 2.0),
                stock("Milk", 1.0, 4.0),
                stock("Salt", 8.0, 10.0),
            ],
        },
    )
    .await?;

    let pantry = pantry_service::get_pantry(&state, &user).await?.data.unwrap();
    let tiers: Vec<StockTier> = pantry.items.iter().map(|i| i.status.tier).collect();
    assert_eq!(
        tiers,
        vec![StockTier::OutOfStock, StockTier::Critical, StockTier::Low]
    );

    let generated = pantry_service::generate_list(
        &state,
        &user,
        GenerateListRequest {
            mode: GenerationMode::Critical,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(generated.outcome, GenerateOutcome::Created);
    let list = generated.list.expect("generated list");
    assert!(list.name.starts_with("Replenishment "));
    let names: Vec<&str> = list.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Rice", "Milk"]);

    // Shopper checks off rice, adds eggs, leaves milk unchecked.
    let mut items: Vec<ItemInput> = list.items.iter().cloned().map(ItemInput::from).collect();
    items[0].completed = true;
    items[0].price = Some(5.0);
    items.push(ItemInput {
        completed: true,
        quantity: Some(12.0),
        price: Some(0.5),
        ..ItemInput::named("Eggs")
    });
    list_service::replace_items(&state, &user, list.id, ReplaceItemsRequest { items }).await?;

    let summary = pantry_service::complete_purchase(
        &state,
        &user,
        list.id,
        CompletePurchaseRequest { archive: true },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(summary.completed_count, 2);
    assert_eq!(summary.matched, 1);
    assert_eq!(summary.created, 1);
    assert_eq!(summary.total_value, 16.0);
    assert!(summary.list.archived);

    let pantry_items = summary.pantry.expect("updated pantry").items;
    let rice = pantry_items.iter().find(|i| i.name == "Rice").unwrap();
    assert_eq!(rice.current_quantity, Some(2.0));
    let milk = pantry_items.iter().find(|i| i.name == "Milk").unwrap();
    assert_eq!(milk.current_quantity, Some(1.0));
    let eggs = pantry_items.iter().find(|i| i.name == "Eggs").unwrap();
    assert_eq!(eggs.current_quantity, Some(12.0));
    assert_eq!(eggs.ideal_quantity, Some(12.0));

    // Archived lists are read-only until restored.
    let rejected = list_service::replace_items(
        &state,
        &user,
        list.id,
        ReplaceItemsRequest { items: vec![] },
    )
    .await;
    assert!(matches!(rejected, Err(AppError::Conflict(_))));
    list_service::restore_list(&state, &user, list.id).await?;

    let history = history_service::list_history(
        &state,
        &user,
        HistoryQuery {
            action: Some(PURCHASE_COMPLETED.to_string()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(history.items.len(), 1);
    let metadata = history.items[0].metadata.clone().unwrap();
    assert_eq!(metadata["item_count"], 2);

    let prices = history_service::price_history(
        &state,
        &user,
        PriceQuery {
            page: None,
            per_page: None,
            name: " rice ".to_string(),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(prices.items.len(), 1);
    assert_eq!(prices.items[0].price, 5.0);

    Ok(())
}

#[tokio::test]
async fn full_pantry_generates_nothing() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = HouseholdUser {
        user_id: Uuid::new_v4(),
    };

    pantry_service::replace_pantry_items(
        &state,
        &user,
        ReplaceItemsRequest {
            items: vec![stock("Coffee", 3.0, 3.0)],
        },
    )
    .await?;

    let generated = pantry_service::generate_list(
        &state,
        &user,
        GenerateListRequest {
            mode: GenerationMode::All,
        },
    )
    .await?;
    assert_eq!(generated.message, "Nothing to buy");
    let data = generated.data.unwrap();
    assert_eq!(data.outcome, GenerateOutcome::NothingToBuy);
    assert!(data.list.is_none());

    Ok(())
}

#[tokio::test]
async fn archived_lists_and_the_pantry_reject_list_edits() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = HouseholdUser {
        user_id: Uuid::new_v4(),
    };

    let list = list_service::create_list(
        &state,
        &user,
        CreateListRequest {
            name: "Weekend".into(),
            budget: None,
            items: vec![ItemInput::named("Bread")],
        },
    )
    .await?
    .data
    .unwrap();
    list_service::archive_list(&state, &user, list.id).await?;

    let renamed = list_service::update_list(
        &state,
        &user,
        list.id,
        UpdateListRequest {
            name: Some("Sunday".into()),
            budget: None,
        },
    )
    .await;
    assert!(matches!(renamed, Err(AppError::Conflict(_))));
    let replaced = list_service::replace_items(
        &state,
        &user,
        list.id,
        ReplaceItemsRequest {
            items: vec![ItemInput::named("Butter")],
        },
    )
    .await;
    assert!(matches!(replaced, Err(AppError::Conflict(_))));

    let pantry = pantry_service::get_pantry(&state, &user).await?.data.unwrap();
    let archived = list_service::archive_list(&state, &user, pantry.id).await;
    assert!(matches!(archived, Err(AppError::BadRequest(_))));
    let replaced = list_service::replace_items(
        &state,
        &user,
        pantry.id,
        ReplaceItemsRequest {
            items: vec![stock("Flour", 1.0, 2.0)],
        },
    )
    .await;
    assert!(matches!(replaced, Err(AppError::BadRequest(_))));
    let renamed = list_service::update_list(
        &state,
        &user,
        pantry.id,
        UpdateListRequest {
            name: Some("Cellar".into()),
            budget: None,
        },
    )
    .await;
    assert!(matches!(renamed, Err(AppError::BadRequest(_))));

    let pantry = pantry_service::get_pantry(&state, &user).await?.data.unwrap();
    assert!(pantry.items.is_empty());

    Ok(())
}

#[tokio::test]
async fn deleting_a_category_uncategorizes_items() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = HouseholdUser {
        user_id: Uuid::new_v4(),
    };

    let dairy = category_service::create_category(
        &state,
        &user,
        CreateCategoryRequest {
            name: "Dairy".into(),
        },
    )
    .await?
    .data
    .unwrap();

    pantry_service::replace_pantry_items(
        &state,
        &user,
        ReplaceItemsRequest {
            items: vec![ItemInput {
                category: Some("dairy".into()),
                ..stock("Cheese", 1.0, 1.0)
            }],
        },
    )
    .await?;

    category_service::delete_category(&state, &user, dairy.id).await?;

    let pantry = pantry_service::get_pantry(&state, &user).await?.data.unwrap();
    assert_eq!(pantry.items[0].item.category, None);
    assert_eq!(pantry.items[0].category_label, "Other");

    Ok(())
}

fn stock(name: &str, current: f64, ideal: f64) -> ItemInput {
    ItemInput {
        current_quantity: Some(current),
        ideal_quantity: Some(ideal),
        ..ItemInput::named(name)
    }
}

// Allow skipping when no DB is configured in the environment.
async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url).await?;
    let orm = orm_from_pool(&pool);
    {
        let mut migrated = MIGRATED.lock().await;
        if !*migrated {
            run_migrations(&orm).await?;
            *migrated = true;
        }
    }

    Ok(Some(AppState {
        pool,
        orm,
        settings: PantrySettings::default(),
    }))
}
