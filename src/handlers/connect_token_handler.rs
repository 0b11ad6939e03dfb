//! Connect Token Handler
//!
//! Issues a Pluggy Connect widget token for a user.

use crate::domain::OperationContext;
use crate::error::AppError;
use crate::pluggy::{ConnectToken, PluggyClient};

use super::ConnectTokenCommand;

/// Handler for connect-token issuance
pub struct ConnectTokenHandler {
    client: PluggyClient,
}

impl ConnectTokenHandler {
    pub fn new(client: PluggyClient) -> Self {
        Self { client }
    }

    /// Execute the connect-token command
    pub async fn execute(
        &self,
        command: ConnectTokenCommand,
        context: &OperationContext,
    ) -> Result<ConnectToken, AppError> {
        command.validate()?;

        let token = self.client.acquire_token().await?;
        let connect_token = self
            .client
            .create_connect_token(&token, &command.user_id, command.item_id.as_deref())
            .await?;

        tracing::info!(
            correlation_id = %context.correlation_id,
            user_id = %command.user_id,
            update_mode = command.item_id.is_some(),
            "Issued connect token"
        );

        Ok(connect_token)
    }
}
