//! Mock business API server.
//!
//! Provides an axum-based HTTP server that simulates the platform's
//! authenticate endpoint and business API.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::config::ApiConfig;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock business API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a realistic API implementation, including the ticket handshake.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// The port the server bound.
    port: u16,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be inspected and modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns
    /// immediately. Use [`client_config`](Self::client_config) to build an
    /// [`ApiConfig`] pointing at it.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when a test wants to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{addr}"),
            port: addr.port(),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the port the server bound.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// An [`ApiConfig`] pointing a client at this server.
    ///
    /// The default state accepts any non-empty credentials, so the config's
    /// test credentials always authenticate unless a test installed specific
    /// ones with [`MockState::with_credentials`].
    pub fn client_config(&self) -> ApiConfig {
        ApiConfig::new("127.0.0.1", "test.user", "test.password")
            .with_ssl(false)
            .with_port(self.port)
    }

    /// Get access to the server's shared state.
    ///
    /// This allows inspecting counters and modifying mock data mid-test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for user in scenario.users {
            state = state.with_user(user);
        }
        for asset in scenario.assets {
            state = state.with_asset(asset);
        }
        for location in scenario.retail_locations {
            state = state.with_retail_location(location);
        }
        for restaurant in scenario.restaurants {
            state = state.with_restaurant(restaurant);
        }
        state.countries = scenario.countries;
        state.states = scenario.states;
        state.profiles = scenario.profiles;
        state.entity_types = scenario.entity_types;
        state.concepts = scenario.concepts;
        state.contact_types = scenario.contact_types;

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Authentication
            .route("/api/Authenticate", post(handlers::authenticate))
            // Users
            .route(
                "/api/biz/Users",
                get(handlers::list_users).post(handlers::create_user),
            )
            .route(
                "/api/biz/Users/:id",
                get(handlers::get_user)
                    .put(handlers::update_user)
                    .delete(handlers::delete_user),
            )
            // Assets
            .route(
                "/api/biz/Assets",
                get(handlers::list_assets).post(handlers::create_asset),
            )
            .route(
                "/api/biz/Assets/:id",
                get(handlers::get_asset)
                    .put(handlers::update_asset)
                    .delete(handlers::delete_asset),
            )
            // Retail locations
            .route(
                "/api/biz/RetailLocations",
                get(handlers::list_retail_locations).post(handlers::create_retail_location),
            )
            .route(
                "/api/biz/RetailLocations/:id",
                get(handlers::get_retail_location)
                    .put(handlers::update_retail_location)
                    .delete(handlers::delete_retail_location),
            )
            // Restaurants
            .route(
                "/api/biz/Restaurants",
                get(handlers::list_restaurants).post(handlers::create_restaurant),
            )
            .route(
                "/api/biz/Restaurants/:id",
                get(handlers::get_restaurant)
                    .put(handlers::update_restaurant)
                    .delete(handlers::delete_restaurant),
            )
            // Lookup tables
            .route("/api/biz/Countries", get(handlers::list_countries))
            .route("/api/biz/States", get(handlers::list_states))
            .route("/api/biz/Profiles", get(handlers::list_profiles))
            .route("/api/biz/EntityTypes", get(handlers::list_entity_types))
            .route("/api/biz/Concepts", get(handlers::list_concepts))
            .route("/api/biz/ContactTypes", get(handlers::list_contact_types))
            // Object queries
            .route("/api/biz/CountObjects", post(handlers::count_objects))
            .route("/api/biz/ListObjects", post(handlers::list_objects))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, User};
    use crate::traits::{Get, List};
    use crate::BizClient;

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_unauthenticated_requests_are_rejected() {
        let server = MockServer::start().await;

        // Straight to the business API with no ticket.
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/api/biz/Users", server.url()))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 401);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_user_with_biz_client() {
        let server = MockServer::start().await;
        let client = BizClient::new(&server.client_config()).unwrap();

        let user = User::get(&client, "jane.doe".to_string())
            .await
            .expect("Failed to get user");

        assert_eq!(user.user_name.as_deref(), Some("jane.doe"));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_assets_with_biz_client() {
        let server = MockServer::start().await;
        let client = BizClient::new(&server.client_config()).unwrap();

        let assets = Asset::list_all(&client).await.expect("Failed to list assets");
        assert_eq!(assets.len(), 2);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server_returns_not_found() {
        let server = MockServer::start_empty().await;
        let client = BizClient::new(&server.client_config()).unwrap();

        let result = User::get(&client, "nonexistent".to_string()).await;
        assert!(result.is_err());

        server.shutdown().await;
    }
}
