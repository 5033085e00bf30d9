//! # Kyte Client
//!
//! An async Rust client library for the Kyte resource API.
//!
//! ## Features
//!
//! - CRUD operations (`post`, `put`, `get`, `delete`) against named backend models
//! - Per-request chained HMAC-SHA256 signing with identity headers
//! - Session establishment from a username/password pair
//! - Opaque JSON request/response bodies via `serde_json::Value`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kyte_api_client::KyteClient;
//! use kyte_api_client::auth::Credentials;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new("public", "private", "account", "identifier");
//!     let client = KyteClient::builder("https://api.example.com", credentials).build();
//!
//!     client.create_session("user@example.com", "hunter2").await?;
//!     let widgets = client.get("Widget", None, None, None).await?;
//!     println!("Widgets: {widgets}");
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;

// Re-export commonly used types at crate root
pub use error::KyteError;
pub use rest::{KyteApi, KyteClient, KyteClientBuilder};

/// Result type alias using KyteError
pub type Result<T> = std::result::Result<T, KyteError>;
