//! Shared HTTP transport.
//!
//! Builds requests against the configured base URL, attaches the session's
//! bearer token when one is held, and maps responses onto [`Fetched`] (reads)
//! or `Result<_, ApiError>` (writes).

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use ledgerdesk_auth::Session;

use crate::{ApiError, ClientConfig, Fetched};

/// HTTP transport shared by every resource client. Cheap to clone.
#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl HttpClient {
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/api/gl-types`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let req = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => req.bearer_auth(token.as_str()),
            None => req,
        }
    }

    /// Send a request and return the raw body of a successful response.
    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> Result<String, ApiError> {
        let mut req = self.request(method.clone(), path);
        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        tracing::debug!(%method, path, status = status.as_u16(), "api request");

        let text = resp.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &text));
        }
        Ok(text)
    }

    fn decode<T: DeserializeOwned>(path: &str, text: &str) -> Result<T, ApiError> {
        serde_json::from_str(text).map_err(|e| ApiError::Decode(format!("{path}: {e}")))
    }

    fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
        serde_json::to_value(body).map_err(|e| ApiError::Decode(format!("request body: {e}")))
    }

    // ── Reads ───────────────────────────────────────────────────────────

    /// `GET` a collection. Failures are logged and reported as `Failed`.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Fetched<Vec<T>> {
        let result = match self.execute(Method::GET, path, None).await {
            Ok(text) => Self::decode::<Vec<T>>(path, &text),
            Err(err) => Err(err),
        };

        match result {
            Ok(items) => Fetched::from_items(items),
            Err(err) => {
                tracing::warn!(path, "list request failed: {err}");
                Fetched::Failed(err)
            }
        }
    }

    /// `GET` a single record. A 404 or a `null` body is `Empty`.
    pub async fn get_one<T: DeserializeOwned>(&self, path: &str) -> Fetched<T> {
        let result = match self.execute(Method::GET, path, None).await {
            Ok(text) => Self::decode::<Option<T>>(path, &text),
            Err(err) => Err(err),
        };

        match result {
            Ok(Some(record)) => Fetched::Loaded(record),
            Ok(None) => Fetched::Empty,
            Err(err) if err.is_not_found() => Fetched::Empty,
            Err(err) => {
                tracing::warn!(path, "get request failed: {err}");
                Fetched::Failed(err)
            }
        }
    }

    // ── Writes ──────────────────────────────────────────────────────────

    /// `POST` a JSON body and decode the response.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.execute(Method::POST, path, Some(Self::encode(body)?)).await?;
        Self::decode(path, &text)
    }

    /// `PUT` a JSON body and decode the response.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.execute(Method::PUT, path, Some(Self::encode(body)?)).await?;
        Self::decode(path, &text)
    }

    /// `DELETE` a record. Returns the deleted record when the backend echoes
    /// it; an empty or acknowledgement-only body yields `None`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        let text = self.execute(Method::DELETE, path, None).await?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<T>(&text) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::debug!(path, "delete response is not a record: {e}");
                Ok(None)
            }
        }
    }

    /// `POST` without a body, ignoring whatever the backend answers.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::POST, path, None).await.map(|_| ())
    }
}

impl core::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish()
    }
}
