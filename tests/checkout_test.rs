mod common;

use common::{setup, Call, Op, Recorder};
use rust_decimal::Decimal;
use table_pos::cart::{cache_key, CartCache, CartError, StorePhase};
use table_pos::checkout::{CheckoutError, CheckoutOrchestrator, OrderPhase};
use table_pos::framework::ActorClient;
use table_pos::gateway::GatewayError;
use table_pos::model::{PaymentMethod, SaleCreate, SaleId, SaleStatus, TableId};
use table_pos::reconcile::PendingSaleReconciler;

#[tokio::test]
async fn test_checkout_of_fresh_cart_creates_then_completes() {
    let fx = setup().await;
    let gateway = Recorder::new(fx.system.gateway());
    let orchestrator = CheckoutOrchestrator::new(gateway.clone());
    let reconciler = PendingSaleReconciler::new(gateway.clone());
    let table = TableId(1);

    let mut store = fx.system.cart_store(table);
    assert!(reconciler.open(&mut store, table).await);
    store.add_item(&fx.menu[0]).unwrap();
    store.add_item(&fx.menu[0]).unwrap();
    assert!(fx.system.cache().load(&cache_key(table)).unwrap().is_some());
    gateway.reset();

    let order = orchestrator
        .checkout(&mut store, Some(&fx.cashier), PaymentMethod::Cash)
        .await
        .unwrap();

    let sale_id = order.sale.id;
    assert_eq!(
        gateway.calls(),
        [
            Call::Create {
                table_id: table,
                items: vec![(fx.menu[0].id, 2)],
                total: Decimal::new(2100, 0),
            },
            Call::Complete {
                sale_id,
                table_id: table,
                total: Decimal::new(2100, 0),
                payment_method: PaymentMethod::Cash,
                cashier: Some(fx.cashier.id),
            },
        ]
    );
    assert_eq!(order.sale.status, SaleStatus::Completed);
    assert_eq!(order.sale.total_amount, Decimal::new(2100, 0));
    assert_eq!(order.subtotal, Decimal::new(2000, 0));
    assert_eq!(order.tax, Decimal::new(100, 0));
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].quantity, 2);

    assert!(store.cart().is_empty());
    assert_eq!(store.pending_order_id(), None);
    assert_eq!(fx.system.cache().load(&cache_key(table)).unwrap(), None);

    let freed = fx.system.tables.get(table).await.unwrap().unwrap();
    assert!(!freed.is_occupied);
    assert_eq!(freed.pending_sale, None);
}

#[tokio::test]
async fn test_checkout_of_saved_order_updates_never_creates() {
    let fx = setup().await;
    // Six earlier sales on other tables, so table 3's order is sale 7
    for table in 4..=9 {
        fx.system
            .sales
            .open_sale(SaleCreate {
                table_id: TableId(table),
                total_amount: Decimal::ZERO,
                opened_at: chrono::Utc::now(),
            })
            .await
            .unwrap();
    }

    let gateway = Recorder::new(fx.system.gateway());
    let orchestrator = CheckoutOrchestrator::new(gateway.clone());
    let reconciler = PendingSaleReconciler::new(gateway.clone());
    let table = TableId(3);

    let mut store = fx.system.cart_store(table);
    reconciler.open(&mut store, table).await;
    store.add_item(&fx.menu[1]).unwrap();
    let saved = orchestrator.save(&mut store).await.unwrap();
    assert_eq!(saved.id(), SaleId(7));
    assert_eq!(OrderPhase::of(&store), OrderPhase::Saved(SaleId(7)));

    // Reopen on another device and bump the quantity to 3
    let mut store = fx.system.cart_store(table);
    reconciler.open(&mut store, table).await;
    assert_eq!(store.pending_order_id(), Some(SaleId(7)));
    store.adjust_quantity(fx.menu[1].id, 2).unwrap();
    gateway.reset();

    let order = orchestrator
        .checkout(&mut store, Some(&fx.cashier), PaymentMethod::Digital)
        .await
        .unwrap();

    let total = Decimal::new(4725, 0);
    assert_eq!(
        gateway.calls(),
        [
            Call::Update {
                sale_id: SaleId(7),
                items: vec![(fx.menu[1].id, 3)],
                total,
            },
            Call::Complete {
                sale_id: SaleId(7),
                table_id: table,
                total,
                payment_method: PaymentMethod::Digital,
                cashier: Some(fx.cashier.id),
            },
        ]
    );
    assert_eq!(order.sale.id, SaleId(7));
    assert_eq!(order.sale.payment_method, Some(PaymentMethod::Digital));
    assert_eq!(order.sale.cashier, Some(fx.cashier.id));
}

#[tokio::test]
async fn test_failed_completion_keeps_cart_and_pending_sale() {
    let fx = setup().await;
    let gateway = Recorder::new(fx.system.gateway());
    let orchestrator = CheckoutOrchestrator::new(gateway.clone());
    let reconciler = PendingSaleReconciler::new(gateway.clone());
    let table = TableId(2);

    let mut store = fx.system.cart_store(table);
    reconciler.open(&mut store, table).await;
    store.add_item(&fx.menu[0]).unwrap();
    store.add_item(&fx.menu[2]).unwrap();
    let before = store.cart().items().to_vec();
    gateway.reset();
    gateway.fail(Op::Complete);

    let err = orchestrator
        .checkout(&mut store, Some(&fx.cashier), PaymentMethod::Cash)
        .await
        .unwrap_err();

    let CheckoutError::Incomplete { sale_id, source } = err else {
        panic!("expected an incomplete checkout");
    };
    assert!(matches!(source, GatewayError::Backend(_)));
    assert_eq!(gateway.ops(), [Op::Create, Op::Complete]);

    // Cart untouched, but now bound to the saved sale
    let kept: Vec<_> = store
        .cart()
        .items()
        .iter()
        .map(|i| (i.product_id, i.quantity))
        .collect();
    let expected: Vec<_> = before.iter().map(|i| (i.product_id, i.quantity)).collect();
    assert_eq!(kept, expected);
    assert_eq!(store.pending_order_id(), Some(sale_id));
    assert!(fx.system.cache().load(&cache_key(table)).unwrap().is_some());

    // The backend still holds the sale as pending
    let hydration = reconciler.load(table).await;
    let pending = hydration.result.unwrap().expect("sale is still pending");
    assert_eq!(pending.id(), sale_id);
    assert!(pending.sale.is_pending());
    assert!(fx.system.tables.get(table).await.unwrap().unwrap().is_occupied);

    // Retrying updates the same sale instead of opening another one
    gateway.heal(Op::Complete);
    gateway.reset();
    let order = orchestrator
        .checkout(&mut store, Some(&fx.cashier), PaymentMethod::Cash)
        .await
        .unwrap();
    assert_eq!(order.sale.id, sale_id);
    assert_eq!(gateway.ops(), [Op::Update, Op::Complete]);
}

#[tokio::test]
async fn test_failed_save_leaves_store_as_it_was() {
    let fx = setup().await;
    let gateway = Recorder::new(fx.system.gateway());
    let orchestrator = CheckoutOrchestrator::new(gateway.clone());
    let reconciler = PendingSaleReconciler::new(gateway.clone());
    let table = TableId(5);

    let mut store = fx.system.cart_store(table);
    reconciler.open(&mut store, table).await;
    store.add_item(&fx.menu[1]).unwrap();
    let before = store.cart().clone();
    gateway.fail(Op::Create);

    let err = orchestrator.save(&mut store).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Gateway(GatewayError::Backend(_))));
    assert_eq!(store.cart(), &before);
    assert_eq!(store.pending_order_id(), None);
    assert_eq!(OrderPhase::of(&store), OrderPhase::Draft);

    let err = orchestrator
        .checkout(&mut store, Some(&fx.cashier), PaymentMethod::Cash)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::Gateway(_)));
    assert_eq!(store.cart(), &before);
    assert!(!fx.system.tables.get(table).await.unwrap().unwrap().is_occupied);
}

#[tokio::test]
async fn test_validation_happens_before_any_gateway_call() {
    let fx = setup().await;
    let gateway = Recorder::new(fx.system.gateway());
    let orchestrator = CheckoutOrchestrator::new(gateway.clone());
    let reconciler = PendingSaleReconciler::new(gateway.clone());
    let table = TableId(6);

    let mut store = fx.system.cart_store(table);
    reconciler.open(&mut store, table).await;
    gateway.reset();

    assert_eq!(
        orchestrator.save(&mut store).await.unwrap_err(),
        CheckoutError::EmptyCart
    );
    // The signed-in check comes first, even for an empty cart
    assert_eq!(
        orchestrator
            .checkout(&mut store, None, PaymentMethod::Cash)
            .await
            .unwrap_err(),
        CheckoutError::Unauthenticated
    );
    assert_eq!(
        orchestrator
            .checkout(&mut store, Some(&fx.cashier), PaymentMethod::Cash)
            .await
            .unwrap_err(),
        CheckoutError::EmptyCart
    );

    // Saving does not need a user
    store.add_item(&fx.menu[2]).unwrap();
    orchestrator.save(&mut store).await.unwrap();
    assert_eq!(gateway.ops(), [Op::Create]);
}

#[tokio::test]
async fn test_store_must_be_loaded_before_saving() {
    let fx = setup().await;
    let gateway = Recorder::new(fx.system.gateway());
    let orchestrator = CheckoutOrchestrator::new(gateway.clone());

    let mut store = fx.system.cart_store(TableId(7));
    let err = orchestrator.save(&mut store).await.unwrap_err();
    assert_eq!(
        err,
        CheckoutError::Cart(CartError::NotReady {
            table_id: TableId(7),
            phase: StorePhase::Loading
        })
    );
    assert!(gateway.calls().is_empty());
}
