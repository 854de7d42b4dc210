//! Business API client library.
//!
//! A Rust library for the ticket-authenticated Business Integration REST
//! API, using a trait-based architecture where each operation (`Get`,
//! `List`, `Create`, `Update`, `Delete`) is defined as a trait that record
//! types implement.
//!
//! The client owns the session ticket: it authenticates on first use,
//! stamps every request with the `Authorization` and `Timestamp` headers,
//! and proactively re-authenticates 40 minutes after ticket issuance so
//! long-running batch operations never fail on a mid-batch expiry.
//!
//! # Quick Start
//!
//! ```no_run
//! use bizapi::models::{Asset, UserSummary};
//! use bizapi::{ApiConfig, BizClient, Create, Get, List};
//!
//! #[tokio::main]
//! async fn main() -> bizapi::Result<()> {
//!     // Create client from environment variables
//!     let client = BizClient::from_env()?;
//!
//!     // Or configure manually
//!     let config = ApiConfig::new("acme.example.com", "integration.user", "secret");
//!     let client = BizClient::new(&config)?;
//!
//!     // Get an asset by ID
//!     let asset = Asset::get(&client, "FRYER-001".to_string()).await?;
//!     println!("Asset: {:?}", asset.description);
//!
//!     // List all users, paging until the last page
//!     let users = UserSummary::list_all(&client).await?;
//!     println!("Found {} users", users.len());
//!
//!     // Insert a new asset
//!     let created = Asset::create(&client, &Asset {
//!         id: Some("OVEN-002".to_string()),
//!         asset_type: Some("Equipment".to_string()),
//!         ..Default::default()
//!     }).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around five operation traits — [`Get`],
//! [`List`], [`Create`], [`Update`] and [`Delete`] — implemented per record
//! type on the shapes the wire actually serves (list endpoints return
//! flattened summary rows, so those types carry the [`List`] impl).
//!
//! [`pagination`] holds the short-page list-all loop, [`firewall`] the
//! count-then-page object iteration helper, and [`transcode`] the JSON↔XML
//! round-trip layer used to verify which record shapes survive the
//! platform's XML storage.
//!
//! # Configuration
//!
//! [`ApiConfig`] is built directly or from environment variables:
//!
//! - `BIZAPI_SITE` (required) - Site host name
//! - `BIZAPI_USERNAME` (required) - Authenticate user name
//! - `BIZAPI_PASSWORD` (required) - Authenticate password
//! - `BIZAPI_USE_SSL` (optional) - `false` only for local dev deployments
//! - `BIZAPI_PORT` (optional) - Port override for self-hosted instances
//!
//! # Testing
//!
//! The `test-server` feature exposes [`mock_server`], an in-process axum
//! server simulating the authenticate handshake and the business API, which
//! the integration suite drives end to end.

mod auth;
mod client;
mod config;
mod error;

pub mod firewall;
pub mod models;
pub mod pagination;
pub mod traits;
pub mod transcode;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use auth::{Ticket, SOFT_EXPIRY_MINUTES};
pub use client::BizClient;
pub use config::{ApiConfig, DEFAULT_POOL_IDLE_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
pub use error::{BizError, Result};
pub use pagination::{PageQuery, DEFAULT_PAGE_SIZE, SERVER_DEFAULT_PAGE_SIZE};

// Re-export traits
pub use traits::{Create, Delete, Get, List, Update};
