//! Startup, wiring and shutdown of the POS backend.

pub mod pos_system;
pub mod tracing;

pub use self::tracing::setup_tracing;
pub use pos_system::{PosSystem, SystemError};
