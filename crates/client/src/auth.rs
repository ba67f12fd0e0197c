//! Login, logout and the current user.
//!
//! The token issued at login is installed in the shared [`Session`], which
//! persists it and makes every [`HttpClient`] clone attach it from then on.

use serde::Serialize;
use serde_json::{Map, Value};

use ledgerdesk_auth::{CurrentUser, GuardState, RouteGuard, Session, SessionToken};

use crate::{ApiError, Fetched, HttpClient};

const LOGIN_PATH: &str = "/api/login";
const LOGOUT_PATH: &str = "/api/logout";
const USER_PATH: &str = "/api/user";

/// Response fields that may carry the issued token, in lookup order.
const TOKEN_FIELDS: [&str; 2] = ["access_token", "token"];

/// Key under which [`LoginSession::body`] always exposes the token.
pub const NORMALIZED_TOKEN_FIELD: &str = "token";

/// Username and password for `POST /api/login`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Result of a login round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginSession {
    /// The backend's response object, with the token copied under `token`.
    pub body: Map<String, Value>,
    pub token: Option<SessionToken>,
}

impl LoginSession {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

fn extract_token(body: &Map<String, Value>) -> Option<String> {
    TOKEN_FIELDS
        .iter()
        .filter_map(|field| body.get(*field)?.as_str())
        .find(|token| !token.is_empty())
        .map(str::to_string)
}

/// Auth round trips against the backend.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: HttpClient,
}

impl AuthClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn session(&self) -> &Session {
        self.http.session()
    }

    /// `POST /api/login`. A token in the response is installed in the
    /// session; a response without one leaves the session untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginSession, ApiError> {
        let response: Value = match self.http.post(LOGIN_PATH, credentials).await {
            Ok(v) => v,
            Err(err) => {
                tracing::warn!(username = %credentials.username, "login failed: {err}");
                return Err(err);
            }
        };

        let Value::Object(mut body) = response else {
            return Err(ApiError::Decode(format!("{LOGIN_PATH}: expected a JSON object")));
        };

        let token = extract_token(&body).map(SessionToken::new);
        match &token {
            Some(token) => {
                self.session().begin(token.clone());
                body.insert(
                    NORMALIZED_TOKEN_FIELD.to_string(),
                    Value::String(token.as_str().to_string()),
                );
                tracing::info!(username = %credentials.username, "signed in");
            }
            None => tracing::warn!(username = %credentials.username, "login response carried no token"),
        }

        Ok(LoginSession { body, token })
    }

    /// `POST /api/logout`. The local token is dropped even if the request
    /// fails; the request's error is still returned.
    pub async fn logout(&self) -> Result<(), ApiError> {
        if !self.session().is_authenticated() {
            return Ok(());
        }

        let result = self.http.post_empty(LOGOUT_PATH).await;
        self.session().end();

        match &result {
            Ok(()) => tracing::info!("signed out"),
            Err(err) => tracing::warn!("logout request failed; local session cleared anyway: {err}"),
        }
        result
    }

    /// `GET /api/user`.
    pub async fn current_user(&self) -> Fetched<CurrentUser> {
        if !self.session().is_authenticated() {
            return Fetched::Empty;
        }
        self.http.get_one(USER_PATH).await
    }

    /// Fetch the current user and run it through `guard`.
    pub async fn guard(&self, guard: &RouteGuard) -> GuardState {
        guard.evaluate(self.current_user().await.into_option())
    }
}
