//! Pi-hole API client and session handling.

use crate::api::{DomainsApi, GroupsApi};
use dropdock_core::{AuthRequest, AuthResponse, DropdockError, Result, Session};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Default Pi-hole API base URL
pub const DEFAULT_BASE_URL: &str = "https://pi.hole/api";

/// Header carrying the session ID on authenticated requests
pub const SESSION_HEADER: &str = "sid";

/// Statuses treated as success
const SUCCESS_STATUSES: [u16; 3] = [200, 201, 204];

/// HTTP methods used against the Pi-hole API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// DELETE
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Delete => Self::DELETE,
        }
    }
}

/// Session held by the client
#[derive(Debug, Clone, Default)]
enum SessionState {
    /// `authenticate()` has not succeeded yet
    #[default]
    Unauthenticated,
    /// Session is open; `None` when Pi-hole has no password set
    Open(Option<String>),
}

/// Pi-hole API client owning one session
#[derive(Clone)]
pub struct PiholeClient {
    inner: Arc<ClientInner>,
    session: SessionState,
}

struct ClientInner {
    http: HttpClient,
    base_url: String,
    password: Option<String>,
}

impl std::fmt::Debug for PiholeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PiholeClient")
            .field("base_url", &self.inner.base_url)
            .field("password", &self.inner.password.as_ref().map(|_| "****"))
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl PiholeClient {
    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> PiholeClientBuilder {
        PiholeClientBuilder::new()
    }

    /// The API base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns true once `authenticate()` has succeeded
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.session, SessionState::Open(_))
    }

    /// Current session ID, if Pi-hole issued one
    #[must_use]
    pub fn sid(&self) -> Option<&str> {
        match &self.session {
            SessionState::Open(sid) => sid.as_deref(),
            SessionState::Unauthenticated => None,
        }
    }

    /// Access group endpoints
    #[must_use]
    pub fn groups(&self) -> GroupsApi<'_> {
        GroupsApi::new(self)
    }

    /// Access domain endpoints
    #[must_use]
    pub fn domains(&self) -> DomainsApi<'_> {
        DomainsApi::new(self)
    }

    /// Establish a session.
    ///
    /// Reuses the current session if Pi-hole still reports it valid,
    /// otherwise submits the configured password. A session that expires
    /// later is not renewed automatically.
    pub async fn authenticate(&mut self) -> Result<()> {
        let current = self.auth_request(Method::Get, None).await?;

        let session = if current.valid {
            debug!("Existing Pi-hole session is valid");
            current
        } else {
            let password = self.inner.password.clone().ok_or_else(|| {
                DropdockError::Authentication(
                    "Pi-hole requires a password but none is configured".to_string(),
                )
            })?;

            let session = self.auth_request(Method::Post, Some(&password)).await?;
            if !session.valid {
                let message = session
                    .message
                    .unwrap_or_else(|| "session not valid".to_string());
                warn!(%message, "Pi-hole authentication failed");
                return Err(DropdockError::Authentication(message));
            }
            session
        };

        info!(validity = ?session.validity, "Pi-hole session established");
        self.session = SessionState::Open(session.sid);
        Ok(())
    }

    /// End the session so it no longer occupies a Pi-hole session slot
    pub async fn logout(&mut self) -> Result<()> {
        if self.sid().is_some() {
            self.delete("/auth").await?;
            debug!("Pi-hole session closed");
        }
        self.session = SessionState::Unauthenticated;
        Ok(())
    }

    /// Perform an authenticated request and decode the response.
    ///
    /// `path` is appended to the base URL and must already be
    /// percent-encoded. Any status other than 200, 201 or 204 yields
    /// [`DropdockError::Request`]. An empty body decodes as `{}`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        let SessionState::Open(sid) = &self.session else {
            return Err(DropdockError::Authentication(
                "not authenticated, call authenticate() first".to_string(),
            ));
        };

        let url = self.build_url(path, query)?;
        debug!(%method, url = %url, "Pi-hole request");

        let mut request = self.inner.http.request(method.into(), url);
        if let Some(sid) = sid {
            request = request.header(SESSION_HEADER, sid.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DropdockError::Http(e.to_string()))?;

        Self::handle_response(response).await
    }

    /// Perform a GET request
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call(Method::Get, path, &[], None).await
    }

    /// Perform a POST request with JSON body
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.call(Method::Post, path, &[], Some(&body)).await
    }

    /// Perform a DELETE request
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.call::<serde_json::Value>(Method::Delete, path, &[], None)
            .await
            .map(drop)
    }

    /// Query or open a session on `/auth`.
    ///
    /// Pi-hole answers a rejected password with 401 and a session object,
    /// so the body is decoded before the status is considered.
    async fn auth_request(&self, method: Method, password: Option<&str>) -> Result<Session> {
        let url = self.build_url("/auth", &[])?;
        debug!(%method, url = %url, "Pi-hole auth request");

        let mut request = self.inner.http.request(method.into(), url);
        if let Some(sid) = self.sid() {
            request = request.header(SESSION_HEADER, sid);
        }
        if let Some(password) = password {
            request = request.json(&AuthRequest { password });
        }

        let response = request
            .send()
            .await
            .map_err(|e| DropdockError::Http(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DropdockError::Http(e.to_string()))?;

        match serde_json::from_str::<AuthResponse>(&body) {
            Ok(parsed) => Ok(parsed.session),
            Err(_) if !SUCCESS_STATUSES.contains(&status) => {
                Err(DropdockError::Request { status, body })
            }
            Err(e) => Err(DropdockError::Json(e)),
        }
    }

    /// Build a URL from the base URL, a path and query parameters
    fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}{}", self.inner.base_url, path);
        let mut url = Url::parse(&raw)
            .map_err(|e| DropdockError::Validation(format!("invalid URL {raw}: {e}")))?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    /// Check the status and decode the body
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DropdockError::Http(e.to_string()))?;

        if !SUCCESS_STATUSES.contains(&status) {
            warn!(status, %body, "Pi-hole request failed");
            return Err(DropdockError::Request { status, body });
        }

        let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str(body).map_err(DropdockError::Json)
    }
}

/// Builder for configuring a [`PiholeClient`]
pub struct PiholeClientBuilder {
    base_url: String,
    password: Option<String>,
    timeout: Option<Duration>,
    user_agent: String,
    accept_invalid_certs: bool,
}

impl Default for PiholeClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PiholeClientBuilder {
    /// Create a new builder pointing at [`DEFAULT_BASE_URL`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            password: None,
            timeout: None,
            user_agent: format!("dropdock/{}", env!("CARGO_PKG_VERSION")),
            accept_invalid_certs: true,
        }
    }

    /// Set the base URL, e.g. `https://pi.hole/api`
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the password used when no valid session exists
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set a request timeout (none by default)
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Verify the Pi-hole TLS certificate (off by default, Pi-hole ships a
    /// self-signed one)
    #[must_use]
    pub const fn verify_certificates(mut self, verify: bool) -> Self {
        self.accept_invalid_certs = !verify;
        self
    }

    /// Build the client. No request is made until `authenticate()`.
    pub fn build(self) -> Result<PiholeClient> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| DropdockError::Validation(format!("invalid base URL {base_url}: {e}")))?;

        let mut http = HttpClient::builder()
            .user_agent(&self.user_agent)
            .danger_accept_invalid_certs(self.accept_invalid_certs);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http
            .build()
            .map_err(|e| DropdockError::Http(e.to_string()))?;

        Ok(PiholeClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                password: self.password,
            }),
            session: SessionState::Unauthenticated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_rejects_invalid_base_url() {
        let err = PiholeClient::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, DropdockError::Validation(_)));
    }

    #[test]
    fn test_build_url_joins_path_and_query() {
        let client = PiholeClient::builder()
            .base_url("https://pi.hole/api/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://pi.hole/api");

        let url = client.build_url("/domains", &[]).unwrap();
        assert_eq!(url.as_str(), "https://pi.hole/api/domains");

        let url = client.build_url("/groups", &[("name", "a b")]).unwrap();
        assert_eq!(url.as_str(), "https://pi.hole/api/groups?name=a+b");
    }

    #[test]
    fn test_debug_hides_password() {
        let client = PiholeClient::builder().password("hunter2").build().unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("****"));
        assert!(!client.is_authenticated());
        assert!(client.sid().is_none());
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(Method::Get), reqwest::Method::GET);
        assert_eq!(reqwest::Method::from(Method::Post), reqwest::Method::POST);
        assert_eq!(reqwest::Method::from(Method::Delete), reqwest::Method::DELETE);
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
