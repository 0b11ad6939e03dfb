//! Handler tests
//!
//! Pluggy is simulated with a wiremock server.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::Credentials;
    use crate::domain::OperationContext;
    use crate::error::AppError;
    use crate::handlers::{
        ConnectTokenCommand, ConnectTokenHandler, SnapshotCommand, SnapshotHandler,
    };
    use crate::pluggy::{PluggyClient, PluggyError};

    fn client(server: &MockServer) -> PluggyClient {
        PluggyClient::new(Credentials::new("id", "secret"), &server.uri()).unwrap()
    }

    async fn mount_auth(server: &MockServer, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/auth"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "apiKey": "k" })))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    // =========================================================================
    // Commands
    // =========================================================================

    #[test]
    fn test_connect_token_command() {
        let cmd = ConnectTokenCommand::new("renan".to_string());
        assert_eq!(cmd.user_id, "renan");
        assert!(cmd.item_id.is_none());
        assert!(cmd.validate().is_ok());

        let cmd = cmd.with_item_id("item-1".to_string());
        assert_eq!(cmd.item_id.as_deref(), Some("item-1"));
    }

    #[test]
    fn test_blank_ids_are_rejected() {
        let err = ConnectTokenCommand::new("  ".to_string()).validate().unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));

        let err = SnapshotCommand::new("renan".to_string(), String::new())
            .validate()
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(msg) if msg.contains("item_id")));
    }

    // =========================================================================
    // ConnectTokenHandler
    // =========================================================================

    #[tokio::test]
    async fn test_connect_token_handler() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        Mock::given(method("POST"))
            .and(path("/connect_token"))
            .and(body_json(json!({ "clientUserId": "renan", "itemId": "item-1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": "widget",
                "expiresAt": "2026-10-16T12:30:00Z",
            })))
            .mount(&server)
            .await;

        let handler = ConnectTokenHandler::new(client(&server));
        let command = ConnectTokenCommand::new("renan".to_string()).with_item_id("item-1".to_string());
        let token = handler
            .execute(command, &OperationContext::new())
            .await
            .unwrap();

        assert_eq!(token.token, "widget");
        assert_eq!(token.raw["expiresAt"], "2026-10-16T12:30:00Z");
    }

    #[tokio::test]
    async fn test_invalid_command_skips_network() {
        let server = MockServer::start().await;
        mount_auth(&server, 0).await;

        let handler = ConnectTokenHandler::new(client(&server));
        let err = handler
            .execute(ConnectTokenCommand::new(String::new()), &OperationContext::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    // =========================================================================
    // SnapshotHandler
    // =========================================================================

    #[tokio::test]
    async fn test_snapshot_handler_aggregates_all_pages() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;

        Mock::given(method("GET"))
            .and(path("/accounts"))
            .and(query_param("itemId", "item-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    { "id": "acc-1", "balance": 100 },
                    { "id": "acc-2", "balance": { "current": 50, "available": 40 } },
                ],
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/transactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "amount": 200 }, { "amount": -30 }],
                "nextCursor": "c1",
            })))
            .with_priority(10)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/transactions"))
            .and(query_param("cursor", "c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "amount": -20 }, { "amount": 0 }],
            })))
            .mount(&server)
            .await;

        let handler = SnapshotHandler::new(client(&server), 90);
        let snapshot = handler
            .execute(
                SnapshotCommand::new("renan".to_string(), "item-1".to_string()),
                &OperationContext::new(),
            )
            .await
            .unwrap();

        assert_eq!(snapshot.user_id, "renan");
        assert_eq!(snapshot.total_balance, 150.0);
        assert_eq!(snapshot.cash_flow.total_inflow, 200.0);
        assert_eq!(snapshot.cash_flow.total_outflow, -50.0);
        assert_eq!(snapshot.cash_flow.net_movement, 150.0);
        assert!(snapshot.cash_flow.window.is_some());
        assert_eq!(snapshot.summary.account_count, 2);
        assert_eq!(snapshot.summary.transaction_count, 4);
    }

    #[tokio::test]
    async fn test_snapshot_handler_without_window() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .expect(2)
            .mount(&server)
            .await;

        let snapshot = SnapshotHandler::new(client(&server), 0)
            .execute(
                SnapshotCommand::new("u".to_string(), "item-1".to_string()),
                &OperationContext::new(),
            )
            .await
            .unwrap();

        assert!(snapshot.cash_flow.window.is_none());
        let received = server.received_requests().await.unwrap();
        assert!(received
            .iter()
            .all(|req| !req.url.query_pairs().any(|(k, _)| k == "from")));
    }

    #[tokio::test]
    async fn test_snapshot_handler_propagates_listing_failure() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/accounts"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/transactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .expect(0)
            .mount(&server)
            .await;

        let err = SnapshotHandler::new(client(&server), 90)
            .execute(
                SnapshotCommand::new("u".to_string(), "item-1".to_string()),
                &OperationContext::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Pluggy(PluggyError::Upstream { .. })));
    }
}
