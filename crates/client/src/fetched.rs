//! Result type of read operations.

use crate::ApiError;

/// Outcome of a read: something loaded, nothing there, or the request failed.
///
/// The swallow-and-default view (`into_items`, `into_option`) collapses
/// `Empty` and `Failed`; match on the variants to tell them apart.
#[derive(Debug)]
pub enum Fetched<T> {
    Loaded(T),
    /// Empty list, or the record does not exist.
    Empty,
    Failed(ApiError),
}

impl<T> Fetched<T> {
    /// The loaded value, `None` when empty or failed.
    pub fn into_option(self) -> Option<T> {
        match self {
            Fetched::Loaded(value) => Some(value),
            Fetched::Empty | Fetched::Failed(_) => None,
        }
    }

    /// `Ok(None)` when empty, `Err` when failed.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        match self {
            Fetched::Loaded(value) => Ok(Some(value)),
            Fetched::Empty => Ok(None),
            Fetched::Failed(err) => Err(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Fetched::Loaded(value) => Fetched::Loaded(f(value)),
            Fetched::Empty => Fetched::Empty,
            Fetched::Failed(err) => Fetched::Failed(err),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Fetched::Loaded(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Fetched::Empty)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Fetched::Failed(_))
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Fetched::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> Fetched<Vec<T>> {
    /// `Loaded` for a non-empty list, `Empty` otherwise.
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            Fetched::Empty
        } else {
            Fetched::Loaded(items)
        }
    }

    /// The loaded items; an empty vector when empty or failed.
    pub fn into_items(self) -> Vec<T> {
        self.into_option().unwrap_or_default()
    }

    /// Keep only the items matching `pred`, order preserved.
    pub fn retain(self, pred: impl FnMut(&T) -> bool) -> Self {
        match self {
            Fetched::Loaded(items) => Fetched::from_items(items.into_iter().filter(pred).collect()),
            other => other,
        }
    }
}
