//! Shared helpers for the integration test suite.

use std::sync::Arc;

use netsuite_client::{Config, MemorySession, NetSuiteClient, TokenPair};

/// Creates a session seeded with a known token pair.
#[allow(dead_code)] // Used by other test files
pub fn seeded_session() -> Arc<MemorySession> {
    Arc::new(MemorySession::new(TokenPair {
        access_token: "initial-access".to_string(),
        refresh_token: "initial-refresh".to_string(),
    }))
}

/// Creates a client pointed at a mock server.
#[allow(dead_code)] // Used by other test files
pub fn test_client(server_uri: &str, session: Arc<MemorySession>) -> NetSuiteClient {
    let config = Config {
        account_id: "test-account".to_string(),
        client_id: "test-client-id".to_string(),
        timeout_seconds: 5,
        ..Default::default()
    };
    NetSuiteClient::new(&config, session)
        .expect("Failed to build client")
        .with_base_url(server_uri)
}
