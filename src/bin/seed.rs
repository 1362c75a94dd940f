use feirinha_pos::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    repository::{NewPaymentMethod, NewProduct},
    state::AppState,
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let state = AppState::from_orm(orm);
    seed_payment_methods(&state).await?;
    seed_products(&state).await?;

    println!("Seed completed.");
    Ok(())
}

async fn seed_payment_methods(state: &AppState) -> anyhow::Result<()> {
    let methods = [
        ("Dinheiro", Decimal::ZERO),
        ("Pix", Decimal::ZERO),
        ("Débito", Decimal::new(199, 2)),
        ("Crédito", Decimal::new(479, 2)),
    ];

    let existing = state.payments.list().await?;
    for (name, tax_rate) in methods {
        if existing.iter().any(|m| m.name == name) {
            continue;
        }
        state
            .payments
            .create(NewPaymentMethod {
                name: name.to_string(),
                tax_rate,
            })
            .await?;
        println!("Ensured payment method {name} (tax={tax_rate}%)");
    }
    Ok(())
}

async fn seed_products(state: &AppState) -> anyhow::Result<()> {
    let products = [
        ("Alface crespa", Decimal::new(350, 2), "Verduras"),
        ("Tomate italiano", Decimal::new(899, 2), "Legumes"),
        ("Banana prata", Decimal::new(650, 2), "Frutas"),
        ("Queijo minas", Decimal::new(3990, 2), "Laticínios"),
    ];

    let existing = state.products.list().await?;
    for (name, price, category) in products {
        if existing.iter().any(|p| p.name == name) {
            continue;
        }
        state
            .products
            .create(NewProduct {
                name: name.to_string(),
                price,
                category: Some(category.to_string()),
                image_url: None,
            })
            .await?;
    }

    println!("Seeded products");
    Ok(())
}
