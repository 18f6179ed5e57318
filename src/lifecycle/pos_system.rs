use crate::cart::{CacheError, CartCache, CartStore, FileCartCache, MemoryCartCache};
use crate::catalog::Catalog;
use crate::checkout::CheckoutOrchestrator;
use crate::clients::{
    CategoryClient, ProductClient, SaleClient, SaleItemClient, TableClient, UserClient,
};
use crate::config::PosConfig;
use crate::gateway::BackendGateway;
use crate::model::{TableCreate, TableId};
use crate::reconcile::PendingSaleReconciler;
use crate::table_actor::TableError;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("cart cache unavailable: {0}")]
    Cache(#[from] CacheError),

    #[error("seeding tables failed: {0}")]
    Seed(#[from] TableError),

    #[error("actor task failed: {0}")]
    ActorFailed(String),
}

/// The running backend: one actor per resource, plus the cart cache.
///
/// # Architecture
///
/// ```text
///   categories ◀── products ◀──┐
///                              ├── sale_items
///   tables ◀────── sales ◀─────┘
///   users
/// ```
///
/// An arrow points at the resource an actor uses as its context. Products check their
/// category, sales claim and release tables, sale items check their sale and product.
///
/// # Example
///
/// ```rust
/// use table_pos::config::PosConfig;
/// use table_pos::lifecycle::PosSystem;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = PosSystem::start(&PosConfig::default()).await?;
///     let (tables, summary) = system.tables.floor().await?;
///     assert_eq!(tables.len(), 12);
///     assert_eq!(summary.available, 12);
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct PosSystem {
    pub tables: TableClient,
    pub categories: CategoryClient,
    pub products: ProductClient,
    pub users: UserClient,
    pub sales: SaleClient,
    pub sale_items: SaleItemClient,
    cache: Arc<dyn CartCache>,
    /// Dependents first, so shutdown waits in the order actors can finish.
    handles: Vec<JoinHandle<()>>,
}

impl PosSystem {
    /// Spawns every actor, wires their contexts and seeds the dining tables.
    pub async fn start(config: &PosConfig) -> Result<Self, SystemError> {
        let cache: Arc<dyn CartCache> = match &config.cache_dir {
            Some(dir) => Arc::new(FileCartCache::open(dir)?),
            None => Arc::new(MemoryCartCache::new()),
        };

        let buffer = config.channel_buffer;
        let (table_actor, tables) = crate::table_actor::new(buffer);
        let (category_actor, categories) = crate::category_actor::new(buffer);
        let (product_actor, products) = crate::product_actor::new(buffer);
        let (user_actor, users) = crate::user_actor::new(buffer);
        let (sale_actor, sales) = crate::sale_actor::new(buffer);
        let (sale_item_actor, sale_items) = crate::sale_item_actor::new(buffer);

        let handles = vec![
            tokio::spawn(sale_item_actor.run((sales.clone(), products.clone()))),
            tokio::spawn(sale_actor.run(tables.clone())),
            tokio::spawn(product_actor.run(categories.clone())),
            tokio::spawn(user_actor.run(())),
            tokio::spawn(category_actor.run(())),
            tokio::spawn(table_actor.run(())),
        ];

        for _ in 0..config.table_count {
            tables.create_table(TableCreate::default()).await?;
        }
        info!(tables = config.table_count, cache_dir = ?config.cache_dir, "POS system started");

        Ok(Self {
            tables,
            categories,
            products,
            users,
            sales,
            sale_items,
            cache,
            handles,
        })
    }

    pub fn gateway(&self) -> BackendGateway {
        BackendGateway::new(
            self.sales.clone(),
            self.sale_items.clone(),
            self.products.clone(),
        )
    }

    pub fn reconciler(&self) -> PendingSaleReconciler<BackendGateway> {
        PendingSaleReconciler::new(self.gateway())
    }

    pub fn orchestrator(&self) -> CheckoutOrchestrator<BackendGateway> {
        CheckoutOrchestrator::new(self.gateway())
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.products.clone(), self.categories.clone())
    }

    /// A cart store for `table_id` backed by the shared cache. It starts out loading.
    pub fn cart_store(&self, table_id: TableId) -> CartStore {
        CartStore::open(table_id, self.cache.clone())
    }

    pub fn cache(&self) -> Arc<dyn CartCache> {
        self.cache.clone()
    }

    /// Drops the system's clients and waits for every actor to stop.
    ///
    /// An actor stops once every client of it is gone, including the ones held by other
    /// actors and by gateways, reconcilers and catalogs handed out earlier. Drop those
    /// first or this call waits for them.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        let Self {
            tables,
            categories,
            products,
            users,
            sales,
            sale_items,
            handles,
            ..
        } = self;
        drop((tables, categories, products, users, sales, sale_items));

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(SystemError::ActorFailed(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
