//! # Table POS
//!
//! > **The cart and pending-order core of a restaurant point of sale.**
//!
//! A waiter opens a table, adds dishes to its cart, saves the order to the kitchen and
//! later checks the table out. This crate holds everything between those taps and the
//! database: the per-table cart, its local cache, the reconciliation against the
//! backend's pending sale, and the save/checkout sequencing.
//!
//! ## 🏗️ Design
//!
//! ### Cart state is a value
//! [`cart::Cart`] is an immutable snapshot; every mutation yields a new one and the
//! [`cart::CartStore`] swaps it in and mirrors it to the cache. Totals are pure
//! functions of the snapshot.
//!
//! ### Server state wins once saved
//! When a table opens, [`reconcile::PendingSaleReconciler`] asks the backend for the
//! table's pending sale. If there is one it seeds the cart; otherwise the cached cart
//! does. A lookup that is still in flight or failed is its own state, never "no sale".
//!
//! ### The backend is a trait
//! [`checkout::CheckoutOrchestrator`] talks to a [`gateway::OrderGateway`]. The crate
//! ships [`gateway::BackendGateway`], built on in-process resource actors (one per
//! table of the relational schema), but anything honouring the trait will do.
//!
//! ### Resources are actors
//! Each backend resource is a [`framework::ResourceActor`] processing its requests one
//! at a time. Dependencies are injected at `run()` time: the sale actor gets a
//! [`clients::TableClient`] and uses it to claim the table, which is how a table ends
//! up with at most one pending sale.
//!
//! ## 🗺️ Module Tour
//!
//! | Layer | Modules |
//! |---|---|
//! | Cart core | [`cart`], [`reconcile`], [`checkout`] |
//! | Backend interface | [`gateway`] |
//! | Resource engine | [`framework`] |
//! | Resources | [`model`], [`clients`], [`table_actor`], [`category_actor`], [`product_actor`], [`user_actor`], [`sale_actor`], [`sale_item_actor`] |
//! | Read side | [`catalog`], [`reports`] |
//! | Runtime | [`config`], [`lifecycle`] |
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod cart;
pub mod catalog;
pub mod category_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod framework;
pub mod gateway;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
pub mod reconcile;
pub mod reports;
pub mod sale_actor;
pub mod sale_item_actor;
pub mod table_actor;
pub mod user_actor;
