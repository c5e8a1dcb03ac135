/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for maintenance-adapter tests

use maintenance_adapter::{ClientConfig, MaintenanceClient};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> MaintenanceClient {
    MaintenanceClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init")
}

/// Machine record as the backend serializes it
pub fn machine_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "location": null,
        "description": null,
        "is_active": true
    })
}

/// Task record as the backend serializes it
#[allow(dead_code)]
pub fn task_json(id: &str, machine_id: &str, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "machine_id": machine_id,
        "title": title,
        "description": null,
        "due_date": "2024-06-01T08:00:00",
        "status": status,
        "created_at": "2024-05-20T09:00:00",
        "updated_at": "2024-05-20T09:00:00"
    })
}
