//! Headless form view.
//!
//! A [`FormView`] owns a persisted draft, turns it into a typed payload via
//! [`FormModel::validate`], and sends it through whatever the caller passes
//! to [`FormView::submit`]. The host renders [`FormView::screen`].

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;

use ledgerdesk_client::{ApiError, Resource, ResourceClient};
use ledgerdesk_core::RecordId;
use ledgerdesk_storage::{PersistedState, Storage, StorageScope};

use crate::FieldErrors;

/// Draft state of one form.
pub trait FormModel: Serialize + DeserializeOwned + Clone + PartialEq + Default {
    /// Storage key of the persisted draft.
    const KEY: &'static str;
    /// Name used in screen messages, e.g. "Purchasing data".
    const TITLE: &'static str;

    type Payload;

    /// Check required fields and build the payload.
    fn validate(&self) -> Result<Self::Payload, FieldErrors>;

    /// Message of the success screen after a submit.
    fn saved_message() -> String {
        format!("{} saved", Self::TITLE)
    }
}

/// What the host should show.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Screen {
    #[default]
    Editing,
    /// Asking whether record `id` should really be deleted.
    Confirm { id: RecordId },
    Success { message: String },
    /// Blocking alert after a failed request.
    Alert { message: String },
}

/// Result of a submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    Saved(T),
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The request failed; the message is also on the alert screen.
    Failed(String),
}

impl<T> SubmitOutcome<T> {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved(_))
    }

    pub fn saved(self) -> Option<T> {
        match self {
            SubmitOutcome::Saved(value) => Some(value),
            _ => None,
        }
    }
}

pub struct FormView<F: FormModel> {
    draft: PersistedState<F>,
    /// Record being edited; `None` for a new record.
    editing: Option<RecordId>,
    screen: Screen,
    errors: FieldErrors,
}

impl<F: FormModel> FormView<F> {
    /// Open the new-record form with its draft in local storage.
    pub fn open(storage: &Storage) -> Self {
        Self::open_in(storage, StorageScope::Local)
    }

    pub fn open_in(storage: &Storage, scope: StorageScope) -> Self {
        Self::from_state(PersistedState::open(storage, F::KEY, F::default(), scope), None)
    }

    /// Open the new-record form pre-filled with `initial` when no draft is
    /// pending.
    pub fn with_initial(storage: &Storage, initial: F) -> Self {
        Self::from_state(PersistedState::open(storage, F::KEY, initial, StorageScope::Local), None)
    }

    /// Open the edit form of record `id`, starting from `record` when no
    /// draft of that record is pending. Each record keeps its own draft.
    pub fn edit_record(storage: &Storage, id: impl Into<RecordId>, record: F) -> Self {
        let id = id.into();
        let key = Self::record_key(&id);
        Self::from_state(PersistedState::open(storage, key, record, StorageScope::Local), Some(id))
    }

    /// Draft key of record `id`'s edit form.
    pub fn record_key(id: &RecordId) -> String {
        format!("{}:{id}", F::KEY)
    }

    fn from_state(draft: PersistedState<F>, editing: Option<RecordId>) -> Self {
        Self {
            draft,
            editing,
            screen: Screen::Editing,
            errors: FieldErrors::default(),
        }
    }

    /// Record being edited, `None` for a new record.
    pub fn editing(&self) -> Option<&RecordId> {
        self.editing.as_ref()
    }

    pub fn draft_key(&self) -> &str {
        self.draft.key()
    }

    pub fn draft(&self) -> &F {
        self.draft.value()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Change the draft; the change is persisted immediately.
    pub fn edit(&mut self, f: impl FnOnce(&mut F)) {
        self.draft.update(f);
    }

    /// Discard the draft.
    pub fn reset(&mut self) {
        self.draft.reset();
        self.errors = FieldErrors::default();
    }

    /// Validate and hand the payload to `send`.
    ///
    /// Invalid drafts never reach `send`. On success the draft is cleared.
    pub async fn submit<T, Fut>(&mut self, send: impl FnOnce(F::Payload) -> Fut) -> SubmitOutcome<T>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let payload = match self.draft().validate() {
            Ok(payload) => payload,
            Err(errors) => {
                tracing::debug!(form = F::KEY, fields = errors.len(), "form has invalid fields");
                self.errors = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }
        };
        self.errors = FieldErrors::default();

        match send(payload).await {
            Ok(saved) => {
                self.draft.reset();
                self.screen = Screen::Success {
                    message: F::saved_message(),
                };
                SubmitOutcome::Saved(saved)
            }
            Err(err) => {
                let message = self.fail(&err);
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Ask for confirmation before deleting record `id`.
    pub fn request_delete(&mut self, id: impl Into<RecordId>) {
        self.screen = Screen::Confirm { id: id.into() };
    }

    /// Run the pending delete through `send`.
    ///
    /// `None` when no delete is awaiting confirmation; nothing is sent then.
    pub async fn confirm<T, Fut>(&mut self, send: impl FnOnce(RecordId) -> Fut) -> Option<Result<T, ApiError>>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let Screen::Confirm { id } = &self.screen else {
            return None;
        };
        let id = id.clone();

        let result = send(id).await;
        match &result {
            Ok(_) => {
                self.screen = Screen::Success {
                    message: format!("{} deleted", F::TITLE),
                };
            }
            Err(err) => {
                self.fail(err);
            }
        }
        Some(result)
    }

    /// Leave the confirmation screen without deleting.
    pub fn cancel(&mut self) {
        if matches!(self.screen, Screen::Confirm { .. }) {
            self.screen = Screen::Editing;
        }
    }

    /// Show a blocking alert.
    pub fn alert(&mut self, message: impl Into<String>) {
        self.screen = Screen::Alert {
            message: message.into(),
        };
    }

    /// Close a success or alert screen.
    pub fn dismiss(&mut self) {
        self.screen = Screen::Editing;
    }

    fn fail(&mut self, err: &ApiError) -> String {
        let message = err.user_message();
        tracing::warn!(form = F::KEY, "form request failed: {err}");

        if let Some(fields) = err.body().and_then(FieldErrors::from_backend) {
            self.errors = fields;
        }
        self.alert(message.clone());
        message
    }
}

// ── Resource-backed forms ───────────────────────────────────────────────

impl<F: FormModel> FormView<F> {
    /// Create the record, or update it when this is an edit form.
    pub async fn save_with<R>(&mut self, client: &ResourceClient<R>) -> SubmitOutcome<R::Record>
    where
        R: Resource<Payload = F::Payload>,
    {
        let editing = self.editing.clone();
        self.submit(|payload| async move {
            match editing {
                Some(id) => client.update(id, &payload).await,
                None => client.create(&payload).await,
            }
        })
        .await
    }

    /// Confirm a pending delete against `client`.
    pub async fn confirm_delete<R: Resource>(
        &mut self,
        client: &ResourceClient<R>,
    ) -> Option<Result<Option<R::Record>, ApiError>> {
        self.confirm(|id| async move { client.delete(id).await }).await
    }
}

impl<F: FormModel + core::fmt::Debug> core::fmt::Debug for FormView<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FormView")
            .field("draft", self.draft())
            .field("editing", &self.editing)
            .field("screen", &self.screen)
            .field("errors", &self.errors)
            .finish()
    }
}
