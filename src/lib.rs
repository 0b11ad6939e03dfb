//! pluggy-relay Library
//!
//! Backend relay for the Pluggy open-banking API. Issues connect tokens for
//! the client-side widget and reduces a connection's accounts and
//! transactions into a financial snapshot.

pub mod api;
pub mod config;
pub mod domain;
mod error;
pub mod handlers;
pub mod pluggy;

pub use api::{build_router, AppState};
pub use config::{Config, Credentials};
pub use domain::{build_snapshot, DateWindow, OperationContext, Snapshot};
pub use error::{AppError, AppResult, ErrorResponse};
pub use pluggy::{PluggyClient, PluggyError};
