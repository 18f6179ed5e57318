//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter. `RUST_LOG` wins
//! when set; otherwise the filter from [`PosConfig::log_filter`](crate::config::PosConfig)
//! applies.
//!
//! ```bash
//! # Actor lifecycle, saves and checkouts
//! RUST_LOG=info cargo run
//!
//! # Every request with its payload
//! RUST_LOG=debug cargo run
//!
//! # Only the cart core
//! RUST_LOG=table_pos::checkout=debug,table_pos::cart=debug cargo run
//! ```
//!
//! Every actor line carries a `resource` field, so one resource can be followed with a
//! plain grep:
//!
//! ```text
//! INFO Actor started resource="Sale"
//! INFO Created resource="Sale" id=sale_1 size=1
//! INFO Action ok resource="DiningTable" id=table_3
//! INFO save: Order saved table_id=table_3 sale_id=sale_1 total=2100.00
//! ```

use tracing_subscriber::EnvFilter;

pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // the `resource` field already says where a line comes from
        .compact()
        .init();
}
