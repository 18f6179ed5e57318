#![allow(dead_code)]

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use table_pos::cart::LineItem;
use table_pos::config::PosConfig;
use table_pos::framework::ActorClient;
use table_pos::gateway::{GatewayError, OrderGateway, PendingSale};
use table_pos::lifecycle::PosSystem;
use table_pos::model::{
    PaymentMethod, Product, ProductCreate, ProductId, Role, Sale, SaleId, TableId, User,
    UserCreate, UserId,
};

/// Gateway operations, for recording and fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Create,
    Update,
    Complete,
    GetPending,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create {
        table_id: TableId,
        items: Vec<(ProductId, u32)>,
        total: Decimal,
    },
    Update {
        sale_id: SaleId,
        items: Vec<(ProductId, u32)>,
        total: Decimal,
    },
    Complete {
        sale_id: SaleId,
        table_id: TableId,
        total: Decimal,
        payment_method: PaymentMethod,
        cashier: Option<UserId>,
    },
    GetPending {
        table_id: TableId,
    },
}

impl Call {
    pub fn op(&self) -> Op {
        match self {
            Call::Create { .. } => Op::Create,
            Call::Update { .. } => Op::Update,
            Call::Complete { .. } => Op::Complete,
            Call::GetPending { .. } => Op::GetPending,
        }
    }
}

/// Wraps a gateway, records every call and fails the operations it is told to.
#[derive(Clone)]
pub struct Recorder<G> {
    inner: G,
    calls: Arc<Mutex<Vec<Call>>>,
    failing: Arc<Mutex<HashSet<Op>>>,
}

impl<G> Recorder<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            calls: Arc::default(),
            failing: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ops(&self) -> Vec<Op> {
        self.calls().iter().map(Call::op).collect()
    }

    pub fn reset(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn heal(&self, op: Op) {
        self.failing.lock().unwrap().remove(&op);
    }

    fn record(&self, call: Call) -> Result<(), GatewayError> {
        let op = call.op();
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(&op) {
            return Err(GatewayError::Backend(format!("injected {op:?} failure")));
        }
        Ok(())
    }
}

fn lines(items: &[LineItem]) -> Vec<(ProductId, u32)> {
    items.iter().map(|i| (i.product_id, i.quantity)).collect()
}

#[async_trait]
impl<G: OrderGateway> OrderGateway for Recorder<G> {
    async fn create_pending_sale(
        &self,
        table_id: TableId,
        items: &[LineItem],
        total_amount: Decimal,
    ) -> Result<PendingSale, GatewayError> {
        self.record(Call::Create {
            table_id,
            items: lines(items),
            total: total_amount,
        })?;
        self.inner
            .create_pending_sale(table_id, items, total_amount)
            .await
    }

    async fn update_pending_sale(
        &self,
        sale_id: SaleId,
        items: &[LineItem],
        total_amount: Decimal,
    ) -> Result<PendingSale, GatewayError> {
        self.record(Call::Update {
            sale_id,
            items: lines(items),
            total: total_amount,
        })?;
        self.inner
            .update_pending_sale(sale_id, items, total_amount)
            .await
    }

    async fn complete_sale(
        &self,
        sale_id: SaleId,
        table_id: TableId,
        total_amount: Decimal,
        payment_method: PaymentMethod,
        cashier: Option<UserId>,
    ) -> Result<Sale, GatewayError> {
        self.record(Call::Complete {
            sale_id,
            table_id,
            total: total_amount,
            payment_method,
            cashier,
        })?;
        self.inner
            .complete_sale(sale_id, table_id, total_amount, payment_method, cashier)
            .await
    }

    async fn get_pending_sale_by_table(
        &self,
        table_id: TableId,
    ) -> Result<Option<PendingSale>, GatewayError> {
        self.record(Call::GetPending { table_id })?;
        self.inner.get_pending_sale_by_table(table_id).await
    }
}

/// A running system with a small menu and one cashier.
pub struct Fixture {
    pub system: PosSystem,
    /// Prices 1000, 1500, 500.
    pub menu: Vec<Product>,
    pub cashier: User,
}

pub async fn setup() -> Fixture {
    let system = PosSystem::start(&PosConfig::default())
        .await
        .expect("system starts");

    let mut menu = Vec::new();
    for (name, price) in [("Tea leaf salad", 1000), ("Mohinga", 1500), ("Lime juice", 500)] {
        let id = system
            .products
            .create_product(ProductCreate {
                name: name.into(),
                price: Decimal::new(price, 0),
                image_url: None,
                category_id: None,
            })
            .await
            .expect("product created");
        menu.push(system.products.get(id).await.unwrap().unwrap());
    }

    let cashier_id = system
        .users
        .create_user(UserCreate {
            full_name: "Aye Aye".into(),
            email: "aye@example.com".into(),
            role: Role::Cashier,
        })
        .await
        .expect("user created");
    let cashier = system.users.get(cashier_id).await.unwrap().unwrap();

    Fixture {
        system,
        menu,
        cashier,
    }
}
