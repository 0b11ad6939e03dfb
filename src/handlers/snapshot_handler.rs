//! Snapshot Handler
//!
//! Authenticates, fetches every account and transaction of a connection,
//! and reduces them into a snapshot. Nothing is reused between requests.

use chrono::Utc;

use crate::domain::{build_snapshot, DateWindow, OperationContext, Snapshot};
use crate::error::AppError;
use crate::pluggy::{PluggyClient, Resource};

use super::SnapshotCommand;

/// Handler for snapshot requests
pub struct SnapshotHandler {
    client: PluggyClient,
    window_days: i64,
}

impl SnapshotHandler {
    pub fn new(client: PluggyClient, window_days: i64) -> Self {
        Self {
            client,
            window_days,
        }
    }

    /// Execute the snapshot command
    pub async fn execute(
        &self,
        command: SnapshotCommand,
        context: &OperationContext,
    ) -> Result<Snapshot, AppError> {
        command.validate()?;

        // One token serves both listings of this request
        let token = self.client.acquire_token().await?;

        let accounts = self
            .client
            .fetch_all(&token, Resource::Accounts, &command.item_id, None)
            .await?;

        let window = DateWindow::last_days(self.window_days, Utc::now());
        let transactions = self
            .client
            .fetch_all(
                &token,
                Resource::Transactions,
                &command.item_id,
                window.as_ref(),
            )
            .await?;

        let snapshot = build_snapshot(
            command.user_id,
            command.item_id,
            accounts,
            transactions,
            window,
        );

        tracing::info!(
            correlation_id = %context.correlation_id,
            item_id = %snapshot.item_id,
            accounts = snapshot.summary.account_count,
            transactions = snapshot.summary.transaction_count,
            "Built snapshot"
        );

        Ok(snapshot)
    }
}
