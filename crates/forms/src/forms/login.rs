//! Login form.

use serde::{Deserialize, Serialize};

use ledgerdesk_client::{AuthClient, Credentials, LoginSession};

use crate::{FieldErrors, FormModel, FormView, SubmitOutcome, Validator};

/// Alert shown when the backend accepts a login without issuing a token.
pub const NO_TOKEN_MESSAGE: &str = "The server accepted the login but issued no session token";

/// Only the username is persisted; the password lives in memory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    #[serde(skip)]
    pub password: String,
}

impl FormModel for LoginForm {
    const KEY: &'static str = "login_form";
    const TITLE: &'static str = "Login";

    type Payload = Credentials;

    fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut v = Validator::new();
        let username = v.required("username", &self.username);
        // Passwords are sent as typed.
        v.ensure("password", !self.password.is_empty(), "is required");

        match username {
            Some(username) if v.is_valid() => Ok(Credentials::new(username, self.password.clone())),
            _ => Err(v.into_errors()),
        }
    }

    fn saved_message() -> String {
        "Signed in".to_string()
    }
}

impl FormView<LoginForm> {
    /// Sign in; on success the session holds the issued token.
    ///
    /// A response without a token is a failure: the draft is kept and the
    /// form shows [`NO_TOKEN_MESSAGE`].
    pub async fn login(&mut self, auth: &AuthClient) -> SubmitOutcome<LoginSession> {
        let draft = self.draft().clone();
        match self.submit(|credentials| async move { auth.login(&credentials).await }).await {
            SubmitOutcome::Saved(login) if !login.is_authenticated() => {
                tracing::warn!("login response carried no token");
                self.edit(|d| *d = draft);
                self.alert(NO_TOKEN_MESSAGE);
                SubmitOutcome::Failed(NO_TOKEN_MESSAGE.to_string())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerdesk_storage::Storage;

    #[test]
    fn both_fields_are_required() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert!(errors.contains("username"));
        assert!(errors.contains("password"));
    }

    #[test]
    fn password_is_never_persisted() {
        let storage = Storage::in_memory();
        let mut view = FormView::<LoginForm>::open(&storage);
        view.edit(|d| {
            d.username = "jdoe".into();
            d.password = "hunter2".into();
        });

        let raw = storage.local().get(LoginForm::KEY).unwrap().unwrap();
        assert!(raw.contains("jdoe"));
        assert!(!raw.contains("hunter2"));

        let reopened = FormView::<LoginForm>::open(&storage);
        assert_eq!(reopened.draft().username, "jdoe");
        assert!(reopened.draft().password.is_empty());
    }
}
