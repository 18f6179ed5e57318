//! # Pending Sale Reconciler
//!
//! Decides what seeds a table's cart when the table view opens. A pending sale on the
//! backend wins; without one the local cache is used. A failed lookup is reported as
//! such and never silently replaced by the cache.

use crate::cart::CartStore;
use crate::gateway::{GatewayError, OrderGateway, PendingSale};
use crate::model::TableId;
use tracing::{debug, instrument};

/// Result of a pending sale lookup, tagged with the table it was issued for.
#[derive(Debug, Clone, PartialEq)]
pub struct Hydration {
    pub table_id: TableId,
    pub result: Result<Option<PendingSale>, GatewayError>,
}

pub struct PendingSaleReconciler<G> {
    gateway: G,
}

impl<G: OrderGateway> PendingSaleReconciler<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Looks up the pending sale of `table_id`.
    #[instrument(skip(self))]
    pub async fn load(&self, table_id: TableId) -> Hydration {
        let result = self.gateway.get_pending_sale_by_table(table_id).await;
        debug!(found = matches!(result, Ok(Some(_))), failed = result.is_err(), "Lookup finished");
        Hydration { table_id, result }
    }

    /// Points `store` at `table_id` and hydrates it.
    ///
    /// Returns whether the store ended up `Ready`.
    pub async fn open(&self, store: &mut CartStore, table_id: TableId) -> bool {
        store.switch_table(table_id);
        let hydration = self.load(table_id).await;
        store.apply_load(hydration);
        store.is_ready()
    }
}
