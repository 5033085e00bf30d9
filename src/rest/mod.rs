//! Kyte REST API client.
//!
//! Dispatches authenticated CRUD requests against named models and performs
//! session establishment.
//!
//! # Trait-based API
//!
//! The [`KyteApi`] trait abstracts the client operations, enabling mock
//! implementations for testing and decorator wrappers.

mod client;
mod headers;
mod traits;

pub use client::{KyteClient, KyteClientBuilder};
pub use headers::*;
pub use traits::KyteApi;
