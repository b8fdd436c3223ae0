use pantry_api::{
    config::AppConfig,
    db::{create_pool, orm_from_pool, run_migrations},
    dto::{
        categories::CreateCategoryRequest,
        lists::{ItemInput, ReplaceItemsRequest},
    },
    error::AppError,
    middleware::household::HouseholdUser,
    services::{category_service, pantry_service},
    state::{AppState, PantrySettings},
};
use uuid::Uuid;

/// Seeds a demo household: a few categories and a pantry with mixed stock levels.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let orm = orm_from_pool(&pool);
    run_migrations(&orm).await?;

    let state = AppState {
        pool,
        orm,
        settings: PantrySettings::from_config(&config),
    };
    let user = HouseholdUser {
        user_id: std::env::var("SEED_USER_ID")
            .ok()
            .and_then(|raw| Uuid::parse_str(&raw).ok())
            .unwrap_or_else(Uuid::new_v4),
    };

    seed_categories(&state, &user).await?;
    seed_pantry(&state, &user).await?;

    println!("Seed completed. User ID: {}", user.user_id);
    Ok(())
}

async fn seed_categories(state: &AppState, user: &HouseholdUser) -> anyhow::Result<()> {
    for name in ["Grains", "Dairy", "Produce", "Cleaning"] {
        let payload = CreateCategoryRequest {
            name: name.to_string(),
        };
        match category_service::create_category(state, user, payload).await {
            Ok(_) | Err(AppError::Conflict(_)) => {}
            Err(err) => return Err(err.into()),
        }
    }
    println!("Seeded categories");
    Ok(())
}

async fn seed_pantry(state: &AppState, user: &HouseholdUser) -> anyhow::Result<()> {
    let stock = [
        ("Rice", "Grains", 0.0, 2.0),
        ("Beans", "Grains", 1.0, 4.0),
        ("Milk", "Dairy", 3.0, 6.0),
        ("Tomato", "Produce", 6.0, 6.0),
        ("Detergent", "Cleaning", 1.0, 2.0),
    ];

    let items = stock
        .into_iter()
        .map(|(name, category, current, ideal)| ItemInput {
            category: Some(category.to_string()),
            current_quantity: Some(current),
            ideal_quantity: Some(ideal),
            ..ItemInput::named(name)
        })
        .collect();

    pantry_service::replace_pantry_items(state, user, ReplaceItemsRequest { items })
        .await?;
    println!("Seeded pantry");
    Ok(())
}
