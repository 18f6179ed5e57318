mod common;

use common::{setup, Op, Recorder};
use std::sync::Arc;
use table_pos::cart::{cache_key, CartCache, CartStore, MemoryCartCache, StorePhase};
use table_pos::checkout::CheckoutOrchestrator;
use table_pos::model::{SaleId, TableId};
use table_pos::reconcile::PendingSaleReconciler;

#[tokio::test]
async fn test_pending_sale_wins_over_local_cache() {
    let fx = setup().await;
    let gateway = fx.system.gateway();
    let reconciler = PendingSaleReconciler::new(gateway.clone());
    let orchestrator = CheckoutOrchestrator::new(gateway);
    let table = TableId(4);

    // Device A saves two teas
    let mut a = fx.system.cart_store(table);
    reconciler.open(&mut a, table).await;
    a.add_item(&fx.menu[0]).unwrap();
    a.add_item(&fx.menu[0]).unwrap();
    orchestrator.save(&mut a).await.unwrap();

    // Device B has an unrelated cart cached for the same table
    let device_b_cache = MemoryCartCache::new();
    let mut b = CartStore::open(table, Arc::new(device_b_cache.clone()));
    b.hydrate(None, table);
    b.add_item(&fx.menu[2]).unwrap();

    reconciler.open(&mut b, table).await;
    assert_eq!(b.pending_order_id(), a.pending_order_id());
    assert_eq!(b.cart().len(), 1);
    assert_eq!(b.cart().quantity_of(fx.menu[0].id), Some(2));
    assert_eq!(b.cart().items()[0].name, fx.menu[0].name);
    assert!(b.cart().items()[0].sale_item_id.is_some());
    // Hydrating leaves device B's cache alone
    let cached = device_b_cache.load(&cache_key(table)).unwrap().unwrap();
    assert!(cached.contains(&format!("\"productId\":{}", fx.menu[2].id.0)));
}

#[tokio::test]
async fn test_cache_seeds_cart_without_pending_sale() {
    let fx = setup().await;
    let reconciler = PendingSaleReconciler::new(fx.system.gateway());
    let table = TableId(8);

    let mut store = fx.system.cart_store(table);
    reconciler.open(&mut store, table).await;
    store.add_item(&fx.menu[1]).unwrap();
    store.adjust_quantity(fx.menu[1].id, 4).unwrap();

    let mut reloaded = fx.system.cart_store(table);
    assert!(reconciler.open(&mut reloaded, table).await);
    assert_eq!(reloaded.cart(), store.cart());
    assert_eq!(reloaded.pending_order_id(), None);

    reloaded.clear().unwrap();
    let mut after_clear = fx.system.cart_store(table);
    reconciler.open(&mut after_clear, table).await;
    assert!(after_clear.cart().is_empty());
}

#[tokio::test]
async fn test_failed_lookup_is_not_treated_as_no_sale() {
    let fx = setup().await;
    let gateway = Recorder::new(fx.system.gateway());
    let reconciler = PendingSaleReconciler::new(gateway.clone());
    let table = TableId(9);

    let mut store = fx.system.cart_store(table);
    reconciler.open(&mut store, table).await;
    store.add_item(&fx.menu[0]).unwrap();

    gateway.fail(Op::GetPending);
    let mut reopened = fx.system.cart_store(table);
    assert!(!reconciler.open(&mut reopened, table).await);
    assert_eq!(reopened.phase(), StorePhase::Failed);
    assert!(reopened.cart().is_empty());
    assert!(reopened.add_item(&fx.menu[1]).is_err());
    // The cached cart survives for the next attempt
    assert!(fx.system.cache().load(&cache_key(table)).unwrap().is_some());

    gateway.heal(Op::GetPending);
    assert!(reconciler.open(&mut reopened, table).await);
    assert_eq!(reopened.cart().quantity_of(fx.menu[0].id), Some(1));
}

#[tokio::test]
async fn test_response_for_previous_table_is_dropped() {
    let fx = setup().await;
    let gateway = fx.system.gateway();
    let reconciler = PendingSaleReconciler::new(gateway.clone());
    let orchestrator = CheckoutOrchestrator::new(gateway);

    let mut seeded = fx.system.cart_store(TableId(1));
    reconciler.open(&mut seeded, TableId(1)).await;
    seeded.add_item(&fx.menu[0]).unwrap();
    let saved = orchestrator.save(&mut seeded).await.unwrap();
    assert_eq!(saved.id(), SaleId(1));

    // The lookup for table 1 resolves after the user has moved to table 2
    let mut store = fx.system.cart_store(TableId(1));
    let slow = reconciler.load(TableId(1)).await;
    store.switch_table(TableId(2));
    assert!(!store.apply_load(slow));
    assert_eq!(store.phase(), StorePhase::Loading);
    assert_eq!(store.pending_order_id(), None);

    let current = reconciler.load(TableId(2)).await;
    assert!(store.apply_load(current));
    assert!(store.is_ready());
    assert!(store.cart().is_empty());
}
