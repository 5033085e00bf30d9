//! Kyte REST API client implementation.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use serde_json::{Map, Value};

use crate::auth::{
    Credentials, RequestTimestamp, SessionState, SessionTokens, identity_header, sign_request,
};
use crate::error::KyteError;
use crate::rest::headers::{APP_ID_HEADER, IDENTITY_HEADER, SESSION_MODEL, SIGNATURE_HEADER};

/// The HTTP methods the Kyte API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Post,
    Put,
    Get,
    Delete,
}

impl Method {
    /// Parse a caller-supplied method string, case-insensitively.
    fn parse(method: &str) -> Result<Self, KyteError> {
        match method.to_ascii_lowercase().as_str() {
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "get" => Ok(Self::Get),
            "delete" => Ok(Self::Delete),
            _ => Err(KyteError::UnsupportedMethod(method.to_string())),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Get => "GET",
            Self::Delete => "DELETE",
        }
    }

    fn requires_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

/// Target URL for one request. The filter pair is appended only when both
/// halves are present.
fn build_url(endpoint: &str, model: &str, field: Option<&str>, value: Option<&str>) -> String {
    let mut url = format!("{endpoint}/{model}");
    if let (Some(field), Some(value)) = (field, value) {
        url.push_str(&format!("/{field}/{value}"));
    }
    url
}

/// The Kyte REST API client.
///
/// Performs CRUD operations against named models on a Kyte backend, signing
/// every request with a fresh identity/signature header pair. Clones share
/// session state, so one established session serves all clones.
///
/// # Example
///
/// ```rust,no_run
/// use kyte_api_client::KyteClient;
/// use kyte_api_client::auth::Credentials;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Credentials::new("public", "private", "account", "identifier");
///     let client = KyteClient::builder("https://api.example.com", credentials)
///         .app_id("my-app")
///         .build();
///
///     client.create_session("user@example.com", "hunter2").await?;
///     let widget = client.get("Widget", Some("id"), Some("42"), None).await?;
///     println!("Widget: {widget}");
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct KyteClient {
    http_client: ClientWithMiddleware,
    endpoint: String,
    credentials: Credentials,
    app_id: Option<String>,
    username_field: String,
    password_field: String,
    session: Arc<SessionState>,
}

impl KyteClient {
    /// Create a new client with default settings.
    pub fn new(endpoint: impl Into<String>, credentials: Credentials) -> Self {
        Self::builder(endpoint, credentials).build()
    }

    /// Create a new client builder.
    pub fn builder(endpoint: impl Into<String>, credentials: Credentials) -> KyteClientBuilder {
        KyteClientBuilder::new(endpoint, credentials)
    }

    /// Issue one authenticated request and return the decoded response body.
    ///
    /// `method` is one of `post`/`put`/`get`/`delete`, case-insensitive. The
    /// `field`/`value` pair, when both are given, is appended to the URL path
    /// as `/field/value`. POST and PUT require a JSON body; GET and DELETE
    /// take none. Caller headers are merged last and may overwrite the
    /// standard ones.
    ///
    /// Fails before any network call on an unsupported method or a missing
    /// POST/PUT body. A non-200 response fails with [`KyteError::Status`]
    /// carrying the raw body.
    pub async fn request(
        &self,
        method: &str,
        model: &str,
        field: Option<&str>,
        value: Option<&str>,
        data: Option<&Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value, KyteError> {
        let method = Method::parse(method)?;
        if method.requires_body() && data.is_none() {
            return Err(KyteError::InvalidRequest(format!(
                "{} requires a JSON body",
                method.as_str()
            )));
        }

        let url = build_url(&self.endpoint, model, field, value);

        // One clock read feeds both signed timestamp forms.
        let timestamp = RequestTimestamp::now()?;
        let signature = sign_request(&self.credentials, timestamp.epoch_seconds)?;
        let identity = identity_header(
            &self.credentials.public_key,
            &self.session.session_token(),
            &timestamp.http_date,
            &self.credentials.account,
        );

        let mut header_map = HeaderMap::new();
        header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        header_map.insert(ACCEPT, HeaderValue::from_static("application/json"));
        header_map.insert(
            HeaderName::from_static(SIGNATURE_HEADER),
            HeaderValue::from_str(&signature)
                .map_err(|e| KyteError::InvalidRequest(format!("Invalid signature header: {e}")))?,
        );
        header_map.insert(
            HeaderName::from_static(IDENTITY_HEADER),
            HeaderValue::from_str(&identity)
                .map_err(|e| KyteError::InvalidRequest(format!("Invalid identity header: {e}")))?,
        );
        if let Some(app_id) = &self.app_id {
            header_map.insert(
                HeaderName::from_static(APP_ID_HEADER),
                HeaderValue::from_str(app_id)
                    .map_err(|e| KyteError::InvalidRequest(format!("Invalid app id: {e}")))?,
            );
        }
        if let Some(headers) = headers {
            for (key, value) in headers {
                let name = HeaderName::from_bytes(key.as_bytes())
                    .map_err(|e| KyteError::InvalidRequest(format!("Invalid header {key}: {e}")))?;
                let value = HeaderValue::from_str(value)
                    .map_err(|e| KyteError::InvalidRequest(format!("Invalid header {key}: {e}")))?;
                header_map.insert(name, value);
            }
        }

        tracing::debug!(method = method.as_str(), url = %url, "dispatching request");

        let mut request = match method {
            Method::Post => self.http_client.post(&url),
            Method::Put => self.http_client.put(&url),
            Method::Get => self.http_client.get(&url),
            Method::Delete => self.http_client.delete(&url),
        }
        .headers(header_map);
        if let Some(data) = data {
            request = request.body(serde_json::to_string(data)?);
        }

        let response = request.send().await?;
        self.parse_response(response).await
    }

    /// Create a record of `model`.
    pub async fn post(
        &self,
        model: &str,
        data: &Value,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value, KyteError> {
        self.request("post", model, None, None, Some(data), headers)
            .await
    }

    /// Update records of `model` matching the filter pair.
    pub async fn put(
        &self,
        model: &str,
        field: Option<&str>,
        value: Option<&str>,
        data: &Value,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value, KyteError> {
        self.request("put", model, field, value, Some(data), headers)
            .await
    }

    /// Fetch records of `model`, optionally filtered.
    pub async fn get(
        &self,
        model: &str,
        field: Option<&str>,
        value: Option<&str>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value, KyteError> {
        self.request("get", model, field, value, None, headers)
            .await
    }

    /// Delete records of `model`, optionally filtered.
    pub async fn delete(
        &self,
        model: &str,
        field: Option<&str>,
        value: Option<&str>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Value, KyteError> {
        self.request("delete", model, field, value, None, headers)
            .await
    }

    /// Exchange a username/password for session credentials.
    ///
    /// On success the session and transaction tokens from the response are
    /// stored and every subsequent request signs with the new session token.
    /// Returns the full decoded response. Session state is left untouched on
    /// every error path, including a response missing either token field.
    pub async fn create_session(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Value, KyteError> {
        let mut body = Map::new();
        body.insert(
            self.username_field.clone(),
            Value::String(username.to_string()),
        );
        body.insert(
            self.password_field.clone(),
            Value::String(password.to_string()),
        );

        let response = self.post(SESSION_MODEL, &Value::Object(body), None).await?;

        // Extract both tokens before assigning either.
        let session_token = extract_token(&response, "sessionToken")?;
        let transaction_token = extract_token(&response, "transactionToken")?;
        self.session.store(SessionTokens {
            session_token,
            transaction_token,
        });
        tracing::debug!("session established");

        Ok(response)
    }

    /// A snapshot of the current session/transaction token pair.
    pub fn session_tokens(&self) -> SessionTokens {
        self.session.snapshot()
    }

    /// Parse a response from the Kyte API.
    async fn parse_response(&self, response: reqwest::Response) -> Result<Value, KyteError> {
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(KyteError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|e| {
            KyteError::InvalidResponse(format!("Failed to parse response: {e}. Body: {body}"))
        })
    }
}

fn extract_token(response: &Value, field: &'static str) -> Result<String, KyteError> {
    response
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(KyteError::MissingField(field))
}

impl std::fmt::Debug for KyteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KyteClient")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .field("app_id", &self.app_id)
            .finish()
    }
}

/// Builder for [`KyteClient`].
pub struct KyteClientBuilder {
    endpoint: String,
    credentials: Credentials,
    app_id: Option<String>,
    username_field: String,
    password_field: String,
    user_agent: Option<String>,
    max_retries: u32,
}

impl KyteClientBuilder {
    /// Create a new builder with default settings.
    pub fn new(endpoint: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            endpoint: endpoint.into(),
            credentials,
            app_id: None,
            username_field: "email".to_string(),
            password_field: "password".to_string(),
            user_agent: None,
            max_retries: 0,
        }
    }

    /// Set the application id sent in the `x-kyte-appid` header.
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Set the outgoing JSON key for the username at session establishment.
    pub fn username_field(mut self, field: impl Into<String>) -> Self {
        self.username_field = field.into();
        self
    }

    /// Set the outgoing JSON key for the password at session establishment.
    pub fn password_field(mut self, field: impl Into<String>) -> Self {
        self.password_field = field.into();
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the maximum number of transport-level retries for transient
    /// failures. Defaults to 0; the client itself never retries.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the client.
    pub fn build(self) -> KyteClient {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("kyte-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("kyte-api-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(self.max_retries);

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        KyteClient {
            http_client: client,
            endpoint: self.endpoint,
            credentials: self.credentials,
            app_id: self.app_id,
            username_field: self.username_field,
            password_field: self.password_field,
            session: Arc::new(SessionState::default()),
        }
    }
}
