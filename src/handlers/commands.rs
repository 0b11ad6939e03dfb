//! Command definitions
//!
//! Commands carry the validated input of one inbound request.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// =========================================================================
// ConnectTokenCommand
// =========================================================================

/// Command to issue a widget connect token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectTokenCommand {
    /// Caller's user identifier, forwarded as the correlation key
    pub user_id: String,
    /// Existing connection to update, if any
    pub item_id: Option<String>,
}

impl ConnectTokenCommand {
    pub fn new(user_id: String) -> Self {
        Self {
            user_id,
            item_id: None,
        }
    }

    pub fn with_item_id(mut self, item_id: String) -> Self {
        self.item_id = Some(item_id);
        self
    }

    pub fn validate(&self) -> Result<(), AppError> {
        require_non_blank("user_id", &self.user_id)?;
        if let Some(item_id) = &self.item_id {
            require_non_blank("item_id", item_id)?;
        }
        Ok(())
    }
}

// =========================================================================
// SnapshotCommand
// =========================================================================

/// Command to build a financial snapshot for one connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotCommand {
    pub user_id: String,
    pub item_id: String,
}

impl SnapshotCommand {
    pub fn new(user_id: String, item_id: String) -> Self {
        Self { user_id, item_id }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        require_non_blank("user_id", &self.user_id)?;
        require_non_blank("item_id", &self.item_id)
    }
}

fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidRequest(format!("{} must not be empty", field)));
    }
    Ok(())
}
