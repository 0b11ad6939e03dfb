//! Pluggy module
//!
//! Client for the Pluggy open-banking API.

pub mod client;
pub mod error;
pub mod models;

pub use client::{AccessToken, PluggyClient};
pub use error::{ErrorKind, PluggyError};
pub use models::{ConnectToken, Record, Resource};
