//! # Table POS demo
//!
//! Walks one table through a service:
//! 1. Seed a small menu and a cashier.
//! 2. Open table 3, add dishes, save the order.
//! 3. Reopen the table in a fresh store; the saved order comes back from the backend.
//! 4. Add one more dish and check out.

use rust_decimal::Decimal;
use table_pos::config::PosConfig;
use table_pos::framework::ActorClient;
use table_pos::lifecycle::{setup_tracing, PosSystem};
use table_pos::model::{PaymentMethod, ProductCreate, Role, TableId, UserCreate};
use table_pos::reports::sales_report;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = PosConfig::from_env()?;
    setup_tracing(&config.log_filter);

    info!("Starting POS demo");
    let system = PosSystem::start(&config).await?;

    // Menu and staff
    let noodles = system.categories.create_category("Noodles".into()).await?;
    let drinks = system.categories.create_category("Drinks".into()).await?;
    let mut menu = Vec::new();
    for (name, price, category) in [
        ("Mohinga", 1500, noodles),
        ("Shan noodles", 1800, noodles),
        ("Lime juice", 1000, drinks),
    ] {
        let id = system
            .products
            .create_product(ProductCreate {
                name: name.into(),
                price: Decimal::new(price, 0),
                image_url: None,
                category_id: Some(category),
            })
            .await?;
        if let Some(product) = system.products.get(id).await? {
            menu.push(product);
        }
    }
    let cashier_id = system
        .users
        .create_user(UserCreate {
            full_name: "Aye Aye".into(),
            email: "aye@example.com".into(),
            role: Role::Cashier,
        })
        .await?;
    let cashier = system.users.get(cashier_id).await?;

    let table = TableId(3);
    let reconciler = system.reconciler();
    let orchestrator = system.orchestrator();

    // First visit: build and save the order
    let mut store = system.cart_store(table);
    async {
        reconciler.open(&mut store, table).await;
        store.add_item(&menu[0])?;
        store.add_item(&menu[0])?;
        store.add_item(&menu[2])?;
        let saved = orchestrator.save(&mut store).await?;
        info!(sale_id = %saved.id(), total = %store.cart().total(), "Order sent to kitchen");
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(tracing::info_span!("first_visit"))
    .await?;

    let (_, floor) = system.tables.floor().await?;
    info!(occupied = floor.occupied, available = floor.available, "Floor");

    // Second visit from another device: the backend order wins
    let mut store = system.cart_store(table);
    let order = async {
        reconciler.open(&mut store, table).await;
        info!(items = store.cart().len(), pending = ?store.pending_order_id(), "Reopened table");
        store.add_item(&menu[1])?;
        let order = orchestrator
            .checkout(&mut store, cashier.as_ref(), PaymentMethod::Cash)
            .await?;
        Ok::<_, Box<dyn std::error::Error>>(order)
    }
    .instrument(tracing::info_span!("checkout"))
    .await?;

    for line in &order.items {
        info!(
            name = %line.name,
            quantity = line.quantity,
            amount = %line.line_total(),
            "Receipt line"
        );
    }
    info!(
        sale_id = %order.sale.id,
        subtotal = %order.subtotal,
        tax = %order.tax,
        total = %order.total,
        "Receipt"
    );

    let report = sales_report(&system.sales, chrono::Utc::now().date_naive()).await?;
    info!(
        total = %report.today.total,
        orders = report.today.order_count,
        average = %report.today.average,
        "Today"
    );

    drop((reconciler, orchestrator));
    system.shutdown().await?;
    Ok(())
}
