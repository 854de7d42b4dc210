//! Business API client.
//!
//! Low-level HTTP client that owns the session ticket and dispatches raw
//! requests. Higher-level operations are implemented via traits on entity
//! types.

use std::sync::Arc;

use chrono::Utc;
use reqwest::header;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::auth::{self, AuthenticateRequest, AuthenticateResponse, Ticket};
use crate::config::ApiConfig;
use crate::error::{BizError, Result};

const AUTHORIZATION_HEADER: &str = "Authorization";
const TIMESTAMP_HEADER: &str = "Timestamp";

const DEFAULT_USER_AGENT: &str = concat!("bizapi/", env!("CARGO_PKG_VERSION"));

/// Low-level business API client.
///
/// Handles the session ticket lifecycle and HTTP requests. Entity-specific
/// operations are implemented via the `Get`, `List`, `Create`, `Update` and
/// `Delete` traits on model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool and share one session ticket.
///
/// # Example
///
/// ```no_run
/// use bizapi::{ApiConfig, BizClient};
///
/// # async fn example() -> bizapi::Result<()> {
/// let config = ApiConfig::new("acme.example.com", "integration.user", "secret");
/// let client = BizClient::new(&config)?;
///
/// // The first request authenticates implicitly, or do it up front:
/// client.authenticate().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BizClient {
    http: Client,
    config: Arc<ApiConfig>,
    base_url: Arc<Url>,
    auth_url: Arc<Url>,
    /// Current session ticket. Replaced wholesale on re-authentication.
    ticket: Arc<tokio::sync::RwLock<Option<Ticket>>>,
    /// Serializes the authenticate critical section so racing callers issue
    /// at most one authentication request.
    auth_lock: Arc<tokio::sync::Mutex<()>>,
}

impl std::fmt::Debug for BizClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BizClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl BizClient {
    /// Create a client from environment variables.
    ///
    /// See [`ApiConfig::from_env`] for the variables used.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or invalid.
    pub fn from_env() -> Result<Self> {
        Self::new(&ApiConfig::from_env()?)
    }

    /// Create a new client from the given configuration.
    ///
    /// No network traffic happens here; the ticket is obtained lazily on the
    /// first request (or via [`authenticate`](Self::authenticate)).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete or the derived
    /// URLs are invalid.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        config.validate()?;

        let base_url = config.business_api_base_url()?;
        let auth_url = config.authentication_url()?;

        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);

        let http = Client::builder()
            .user_agent(user_agent)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.request_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .build()
            .map_err(BizError::HttpError)?;

        Ok(Self {
            http,
            config: Arc::new(config.clone()),
            base_url: Arc::new(base_url),
            auth_url: Arc::new(auth_url),
            ticket: Arc::new(tokio::sync::RwLock::new(None)),
            auth_lock: Arc::new(tokio::sync::Mutex::new(())),
        })
    }

    /// Get the business API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Snapshot of the current session ticket, if any.
    pub async fn ticket(&self) -> Option<Ticket> {
        self.ticket.read().await.clone()
    }

    // =========================================================================
    // Ticket lifecycle
    // =========================================================================

    /// Authenticate against the site, replacing any existing ticket.
    ///
    /// Issues `POST /api/Authenticate` with the configured credentials.
    /// Normally unnecessary: every request refreshes the ticket when needed.
    ///
    /// # Errors
    ///
    /// Returns [`BizError::AuthenticationFailed`] if the server rejects the
    /// credentials. Authentication is never retried.
    pub async fn authenticate(&self) -> Result<()> {
        let _guard = self.auth_lock.lock().await;
        self.authenticate_locked().await?;
        Ok(())
    }

    /// Re-authenticate if the ticket is missing or past its soft expiry.
    ///
    /// The ticket issued by the authenticate call is valid for one hour
    /// server-side; the client replaces it after 40 minutes so long-running
    /// processes (e.g. paging through thousands of records) never fail
    /// mid-operation. Public so batch loops can refresh between pages.
    pub async fn reauthenticate_if_nearing_expiration(&self) -> Result<()> {
        self.fresh_ticket().await?;
        Ok(())
    }

    /// Return a usable ticket value, authenticating if needed.
    ///
    /// Double-checked: the staleness condition is re-evaluated after taking
    /// the auth lock, so callers racing on a stale ticket trigger exactly one
    /// authentication request and all proceed on the resulting ticket.
    async fn fresh_ticket(&self) -> Result<String> {
        if let Some(value) = self.current_ticket_value().await {
            return Ok(value);
        }

        let _guard = self.auth_lock.lock().await;
        if let Some(value) = self.current_ticket_value().await {
            return Ok(value);
        }

        self.authenticate_locked().await.map_err(|err| {
            tracing::error!(error = %err, "unable to re-authenticate the API connection");
            err
        })
    }

    /// The current ticket value if one exists and is still fresh.
    async fn current_ticket_value(&self) -> Option<String> {
        let guard = self.ticket.read().await;
        guard
            .as_ref()
            .filter(|ticket| !ticket.is_stale(Utc::now()))
            .map(|ticket| ticket.value.clone())
    }

    /// Perform the authenticate call. Caller must hold `auth_lock`.
    async fn authenticate_locked(&self) -> Result<String> {
        let body = AuthenticateRequest {
            user_name: &self.config.user_name,
            password: &self.config.password,
        };

        let response = self
            .http
            .post(self.auth_url.as_ref().clone())
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(BizError::HttpError)?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::extract_error_message(response, status).await;
            return Err(BizError::AuthenticationFailed {
                message,
                status_code: status.as_u16(),
            });
        }

        let authorization: AuthenticateResponse = Self::decode_json(response).await?;

        // Despite the wire name, TicketExpires carries the issuance time;
        // the server tracks actual expiry itself.
        let issued_at = match auth::from_rfc1123(&authorization.ticket_expires) {
            Some(instant) => instant,
            None => {
                tracing::warn!(
                    value = %authorization.ticket_expires,
                    "TicketExpires is not RFC 1123, using local clock for issuance time"
                );
                Utc::now()
            }
        };

        let ticket = Ticket {
            value: authorization.ticket,
            issued_at,
        };
        let value = ticket.value.clone();
        *self.ticket.write().await = Some(ticket);

        tracing::debug!(issued_at = %issued_at, "authenticated");
        Ok(value)
    }

    // =========================================================================
    // Request dispatch
    // =========================================================================

    /// Make a GET request and deserialize the JSON response.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        Self::decode_json(response).await
    }

    /// Make a GET request with query parameters and deserialize the response.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let path = Self::append_query(path, query)?;
        self.get_json(&path).await
    }

    /// Make a GET request, returning the response body verbatim.
    #[tracing::instrument(skip(self))]
    pub async fn get_raw(&self, path: &str) -> Result<String> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        response.text().await.map_err(BizError::HttpError)
    }

    /// Make a POST request with a JSON body and deserialize the response.
    #[tracing::instrument(skip(self, body))]
    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(Method::POST, path, Some(body)).await?;
        Self::decode_json(response).await
    }

    /// Make a PUT request with a JSON body and deserialize the response.
    #[tracing::instrument(skip(self, body))]
    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        Self::decode_json(response).await
    }

    /// Make a DELETE request, discarding the (typically empty) response body.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    /// Make a DELETE request with a JSON body, returning the response text.
    #[tracing::instrument(skip(self, body))]
    pub async fn delete_json<B>(&self, path: &str, body: &B) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(Method::DELETE, path, Some(body)).await?;
        response.text().await.map_err(BizError::HttpError)
    }

    /// Dispatch one authenticated request.
    ///
    /// Refreshes the ticket if needed, stamps the `Authorization`,
    /// `Timestamp` and `Accept` headers, and checks the response status.
    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let ticket = self.fresh_ticket().await?;
        let url = self.base_url.join(path)?;

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(header::ACCEPT, "application/json")
            .header(AUTHORIZATION_HEADER, ticket)
            // The server validates the ticket against the caller's clock.
            .header(TIMESTAMP_HEADER, auth::to_rfc1123(Utc::now()));

        if method == Method::DELETE {
            // A DELETE answered with a bodiless 204 corrupts a kept-alive
            // connection on its next reuse, so force closure for deletes only.
            request = request.header(header::CONNECTION, "close");
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| {
            tracing::error!(%method, url = %url, error = %err, "unable to send request");
            BizError::HttpError(err)
        })?;

        Self::check_response(response).await
    }

    /// Check response status and convert failures.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        tracing::debug!(
            status = status.as_u16(),
            reason = status.canonical_reason().unwrap_or("unknown"),
            "non-success response"
        );

        let message = Self::extract_error_message(response, status).await;
        Err(BizError::ApiError {
            message,
            status_code: status.as_u16(),
        })
    }

    /// Extract a human-readable message from a failed response.
    ///
    /// The upstream API answers validation failures with message text rather
    /// than a structured error schema, sometimes wrapped in a JSON object.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(msg) = json.get("Message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }

    /// Deserialize a JSON response body, logging the body on failure.
    async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text().await.map_err(BizError::HttpError)?;
        tracing::debug!(body = %body, "response");

        serde_json::from_str(&body).map_err(|err| {
            tracing::error!(error = %err, body = %body, "unable to deserialize response");
            BizError::ParseError(err)
        })
    }

    /// Serialize query parameters onto a relative path.
    fn append_query<Q: Serialize + ?Sized>(path: &str, query: &Q) -> Result<String> {
        let query = to_query_string(query)?;
        if query.is_empty() {
            Ok(path.to_string())
        } else {
            Ok(format!("{path}?{query}"))
        }
    }

    /// Backdate the current ticket so tests can cross the soft-expiry window
    /// without waiting it out.
    #[cfg(test)]
    async fn backdate_ticket(&self, minutes: i64) {
        let mut guard = self.ticket.write().await;
        if let Some(ticket) = guard.as_mut() {
            ticket.issued_at -= chrono::Duration::minutes(minutes);
        }
    }
}

/// Serialize a value into URL-encoded query pairs.
///
/// Going through a string keeps the relative-path-plus-query form a single
/// `join` on the base URL. `None` fields are dropped, matching the
/// null-omission applied to request bodies.
fn to_query_string<Q: Serialize + ?Sized>(query: &Q) -> Result<String> {
    let value = serde_json::to_value(query)?;
    let map = match value {
        serde_json::Value::Object(map) => map,
        serde_json::Value::Null => return Ok(String::new()),
        other => {
            return Err(BizError::InvalidConfig(format!(
                "query parameters must serialize to an object, got {other}"
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        let text = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        pairs.push(format!(
            "{}={}",
            urlencoding::encode(&key),
            urlencoding::encode(&text)
        ));
    }
    Ok(pairs.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> ApiConfig {
        ApiConfig::new("127.0.0.1", "test.user", "test.password")
            .with_ssl(false)
            .with_port(server.address().port())
    }

    fn auth_response(ticket: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Ticket": ticket,
            "TicketExpires": auth::to_rfc1123(Utc::now()),
        }))
    }

    async fn mount_auth(server: &MockServer, ticket: &str) {
        Mock::given(method("POST"))
            .and(path("/api/Authenticate"))
            .and(body_json(serde_json::json!({
                "UserName": "test.user",
                "Password": "test.password",
            })))
            .respond_with(auth_response(ticket))
            .mount(server)
            .await;
    }

    #[test]
    fn test_client_debug_hides_credentials() {
        let config = ApiConfig::new("acme.example.com", "user", "hunter2");
        let client = BizClient::new(&config).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("BizClient"));
        assert!(!debug.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_first_request_authenticates_and_stamps_headers() {
        let server = MockServer::start().await;
        mount_auth(&server, "ticket-1").await;

        Mock::given(method("GET"))
            .and(path("/api/biz/Countries"))
            .and(header("Authorization", "ticket-1"))
            .and(header("Accept", "application/json"))
            .and(header_exists("Timestamp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = BizClient::new(&test_config(&server)).unwrap();
        let countries: Vec<serde_json::Value> = client.get_json("Countries").await.unwrap();
        assert!(countries.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_requests_authenticate_once() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/Authenticate"))
            .respond_with(auth_response("ticket-1"))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/biz/Countries"))
            .and(header("Authorization", "ticket-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(8)
            .mount(&server)
            .await;

        let client = BizClient::new(&test_config(&server)).unwrap();

        let calls = (0..8).map(|_| {
            let client = client.clone();
            tokio::spawn(async move {
                client.get_json::<Vec<serde_json::Value>>("Countries").await
            })
        });
        for handle in calls.collect::<Vec<_>>() {
            handle.await.unwrap().unwrap();
        }
    }

    #[tokio::test]
    async fn test_stale_ticket_triggers_reauthentication() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/Authenticate"))
            .respond_with(auth_response("ticket-1"))
            .expect(2)
            .mount(&server)
            .await;

        let client = BizClient::new(&test_config(&server)).unwrap();
        client.authenticate().await.unwrap();

        // Inside the soft window nothing happens.
        client.reauthenticate_if_nearing_expiration().await.unwrap();

        client.backdate_ticket(41).await;
        client.reauthenticate_if_nearing_expiration().await.unwrap();

        let ticket = client.ticket().await.unwrap();
        assert!(!ticket.is_stale(Utc::now()));
    }

    #[tokio::test]
    async fn test_authentication_failure_is_fatal() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/Authenticate"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid user name or password"))
            .expect(1)
            .mount(&server)
            .await;

        let client = BizClient::new(&test_config(&server)).unwrap();
        let err = client
            .get_json::<Vec<serde_json::Value>>("Countries")
            .await
            .unwrap_err();

        match err {
            BizError::AuthenticationFailed { message, status_code } => {
                assert_eq!(status_code, 401);
                assert!(message.contains("Invalid user name"));
            }
            other => panic!("expected AuthenticationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_sends_connection_close() {
        let server = MockServer::start().await;
        mount_auth(&server, "ticket-1").await;

        Mock::given(method("DELETE"))
            .and(path("/api/biz/Assets/FRYER-001"))
            .and(header("Connection", "close"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/biz/Assets/FRYER-002"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"Id": "FRYER-002", "Type": "Equipment"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = BizClient::new(&test_config(&server)).unwrap();
        client.delete("Assets/FRYER-001").await.unwrap();

        // The connection used for the DELETE is gone; the next request on
        // this client must still succeed.
        let asset: serde_json::Value = client.get_json("Assets/FRYER-002").await.unwrap();
        assert_eq!(asset["Id"], "FRYER-002");
    }

    #[tokio::test]
    async fn test_api_error_carries_status_and_message() {
        let server = MockServer::start().await;
        mount_auth(&server, "ticket-1").await;

        Mock::given(method("POST"))
            .and(path("/api/biz/Assets"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Id was not provided."))
            .mount(&server)
            .await;

        let client = BizClient::new(&test_config(&server)).unwrap();
        let err = client
            .post_json::<serde_json::Value, _>("Assets", &serde_json::json!({"Type": "Equipment"}))
            .await
            .unwrap_err();

        match err {
            BizError::ApiError { message, status_code } => {
                assert_eq!(status_code, 400);
                assert!(message.contains("not provided"));
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_response_is_parse_error() {
        let server = MockServer::start().await;
        mount_auth(&server, "ticket-1").await;

        Mock::given(method("GET"))
            .and(path("/api/biz/Countries"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>surprise</html>"))
            .mount(&server)
            .await;

        let client = BizClient::new(&test_config(&server)).unwrap();
        let err = client
            .get_json::<Vec<serde_json::Value>>("Countries")
            .await
            .unwrap_err();
        assert!(matches!(err, BizError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_get_raw_passes_body_through() {
        let server = MockServer::start().await;
        mount_auth(&server, "ticket-1").await;

        Mock::given(method("GET"))
            .and(path("/api/biz/Countries"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"CountryCode":"US"}]"#))
            .mount(&server)
            .await;

        let client = BizClient::new(&test_config(&server)).unwrap();
        let raw = client.get_raw("Countries").await.unwrap();
        assert_eq!(raw, r#"[{"CountryCode":"US"}]"#);
    }

    #[test]
    fn test_append_query_skips_null_values() {
        #[derive(Serialize)]
        struct Query {
            #[serde(rename = "pageIndex")]
            page_index: u32,
            #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
            page_size: Option<i32>,
        }

        let with_size = BizClient::append_query(
            "Users",
            &Query {
                page_index: 2,
                page_size: Some(200),
            },
        )
        .unwrap();
        assert_eq!(with_size, "Users?pageIndex=2&pageSize=200");

        let without_size = BizClient::append_query(
            "Users",
            &Query {
                page_index: 0,
                page_size: None,
            },
        )
        .unwrap();
        assert_eq!(without_size, "Users?pageIndex=0");
    }
}
