//! Domain module
//!
//! Snapshot aggregation and request-scoped types.

pub mod context;
pub mod snapshot;
pub mod window;

pub use context::OperationContext;
pub use snapshot::{account_balance, build_snapshot, transaction_amount, CashFlow, Snapshot, Summary};
pub use window::DateWindow;
