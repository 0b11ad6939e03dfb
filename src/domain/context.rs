//! Operation Context
//!
//! Per-request metadata used for tracing.

use std::net::IpAddr;

use serde::Serialize;
use uuid::Uuid;

/// Context for one inbound request
#[derive(Debug, Clone, Serialize)]
pub struct OperationContext {
    /// Correlation ID for request tracing
    pub correlation_id: Uuid,

    /// Client IP address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<IpAddr>,
}

impl OperationContext {
    /// Create a context with a fresh correlation ID
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            client_ip: None,
        }
    }

    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    pub fn with_client_ip(mut self, ip: IpAddr) -> Self {
        self.client_ip = Some(ip);
        self
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}
