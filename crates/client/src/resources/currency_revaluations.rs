use ledgerdesk_accounting::{CurrencyRevaluation, RevaluationRequest};

use crate::{ApiError, Resource, ResourceClient};

/// `/api/currency-revaluations`
pub struct CurrencyRevaluationsApi;

impl Resource for CurrencyRevaluationsApi {
    const NAME: &'static str = "currency revaluation";
    const PATH: &'static str = "/api/currency-revaluations";

    type Record = CurrencyRevaluation;
    type Payload = RevaluationRequest;
}

pub type CurrencyRevaluationClient = ResourceClient<CurrencyRevaluationsApi>;

impl ResourceClient<CurrencyRevaluationsApi> {
    /// Revalue open foreign-currency balances as of `request.date`.
    ///
    /// `POST /api/currency-revaluations/revaluate`; errors propagate like writes.
    pub async fn revaluate(&self, request: &RevaluationRequest) -> Result<CurrencyRevaluation, ApiError> {
        let path = format!("{}/revaluate", CurrencyRevaluationsApi::PATH);
        let run: Result<CurrencyRevaluation, ApiError> = self.http().post(&path, request).await;
        match &run {
            Ok(run) => tracing::info!(date = %run.date, "currency revaluation posted"),
            Err(err) => tracing::warn!(date = %request.date, "currency revaluation failed: {err}"),
        }
        run
    }
}
