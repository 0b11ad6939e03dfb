//! Command Handlers module
//!
//! Handlers that orchestrate one inbound request against Pluggy.

mod commands;
mod connect_token_handler;
mod snapshot_handler;

#[cfg(test)]
mod tests;

pub use commands::*;
pub use connect_token_handler::ConnectTokenHandler;
pub use snapshot_handler::SnapshotHandler;
