//! Mock business API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! platform's authenticate endpoint and business API for integration and
//! end-to-end testing. Unlike wiremock, which mocks at the HTTP level
//! per-test, this server maintains state across requests — tickets stay
//! valid between calls, created records are visible to later reads — which
//! enables realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use bizapi::mock_server::MockServer;
//! use bizapi::{BizClient, Get, models::User};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = BizClient::new(&server.client_config()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let user = User::get(&client, "jane.doe".to_string()).await.unwrap();
//!     assert_eq!(user.user_name.as_deref(), Some("jane.doe"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{MockState, ObjectRow};
