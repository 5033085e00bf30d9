//! Trait definition for the Kyte REST API client.
//!
//! The [`KyteApi`] trait abstracts the five client operations. This enables:
//! - Mock implementations for testing
//! - Decorator pattern (e.g., a retry or caching wrapper)
//! - Alternative implementations

use std::collections::HashMap;
use std::future::Future;

use serde_json::Value;

use crate::error::KyteError;
use crate::rest::client::KyteClient;

/// Trait defining the Kyte REST API operations.
///
/// All methods are async and return `Result<Value, KyteError>`.
pub trait KyteApi: Send + Sync {
    /// Create a record of `model`.
    fn post(
        &self,
        model: &str,
        data: &Value,
        headers: Option<&HashMap<String, String>>,
    ) -> impl Future<Output = Result<Value, KyteError>> + Send;

    /// Update records of `model` matching the filter pair.
    fn put(
        &self,
        model: &str,
        field: Option<&str>,
        value: Option<&str>,
        data: &Value,
        headers: Option<&HashMap<String, String>>,
    ) -> impl Future<Output = Result<Value, KyteError>> + Send;

    /// Fetch records of `model`, optionally filtered.
    fn get(
        &self,
        model: &str,
        field: Option<&str>,
        value: Option<&str>,
        headers: Option<&HashMap<String, String>>,
    ) -> impl Future<Output = Result<Value, KyteError>> + Send;

    /// Delete records of `model`, optionally filtered.
    fn delete(
        &self,
        model: &str,
        field: Option<&str>,
        value: Option<&str>,
        headers: Option<&HashMap<String, String>>,
    ) -> impl Future<Output = Result<Value, KyteError>> + Send;

    /// Exchange a username/password for session credentials.
    fn create_session(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<Value, KyteError>> + Send;
}

impl KyteApi for KyteClient {
    async fn post(
        &self,
        model: &str,
        data: &Value,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value, KyteError> {
        KyteClient::post(self, model, data, headers).await
    }

    async fn put(
        &self,
        model: &str,
        field: Option<&str>,
        value: Option<&str>,
        data: &Value,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value, KyteError> {
        KyteClient::put(self, model, field, value, data, headers).await
    }

    async fn get(
        &self,
        model: &str,
        field: Option<&str>,
        value: Option<&str>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value, KyteError> {
        KyteClient::get(self, model, field, value, headers).await
    }

    async fn delete(
        &self,
        model: &str,
        field: Option<&str>,
        value: Option<&str>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value, KyteError> {
        KyteClient::delete(self, model, field, value, headers).await
    }

    async fn create_session(&self, username: &str, password: &str) -> Result<Value, KyteError> {
        KyteClient::create_session(self, username, password).await
    }
}
