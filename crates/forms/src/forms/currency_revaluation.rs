//! Currency revaluation run.

use serde::{Deserialize, Serialize};

use ledgerdesk_accounting::{CurrencyRevaluation, RevaluationRequest};
use ledgerdesk_client::resources::CurrencyRevaluationClient;

use crate::{FieldErrors, FormModel, FormView, SubmitOutcome, Validator};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyRevaluationForm {
    /// Revaluation date, `YYYY-MM-DD`.
    pub date: String,
    pub memo: String,
}

impl FormModel for CurrencyRevaluationForm {
    const KEY: &'static str = "currency_revaluation_form";
    const TITLE: &'static str = "Currency revaluation";

    type Payload = RevaluationRequest;

    fn validate(&self) -> Result<RevaluationRequest, FieldErrors> {
        let mut v = Validator::new();
        match v.date("date", &self.date) {
            Some(date) => Ok(RevaluationRequest {
                date,
                memo: Validator::optional(&self.memo),
            }),
            None => Err(v.into_errors()),
        }
    }
}

impl FormView<CurrencyRevaluationForm> {
    /// Post the revaluation run.
    pub async fn revaluate(&mut self, client: &CurrencyRevaluationClient) -> SubmitOutcome<CurrencyRevaluation> {
        self.submit(|request| async move { client.revaluate(&request).await }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_is_required() {
        let errors = CurrencyRevaluationForm::default().validate().unwrap_err();
        assert_eq!(errors.get("date"), Some("is required"));
    }

    #[test]
    fn blank_memo_is_dropped() {
        let request = CurrencyRevaluationForm {
            date: "2024-06-30".into(),
            memo: "  ".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(request.memo, None);
    }
}
