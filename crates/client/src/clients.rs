//! Every client, wired to one transport.

use ledgerdesk_auth::Session;

use crate::resources::{
    AuditTrailClient, CrmContactClient, CrmPersonClient, CurrencyRevaluationClient, CustomerContactClient,
    GlTypeClient, PersonCache, PurchDataClient, SuppAllocationClient, TaxAlgorithmClient, WoIssueClient,
    WoIssueItemClient,
};
use crate::{ApiError, AuthClient, ClientConfig, HttpClient};

/// The full set of API clients sharing one [`HttpClient`] and session.
#[derive(Debug, Clone)]
pub struct ApiClients {
    pub auth: AuthClient,
    pub gl_types: GlTypeClient,
    pub tax_algorithms: TaxAlgorithmClient,
    pub purch_data: PurchDataClient,
    pub audit_trails: AuditTrailClient,
    pub supp_allocations: SuppAllocationClient,
    pub wo_issues: WoIssueClient,
    pub wo_issue_items: WoIssueItemClient,
    pub currency_revaluations: CurrencyRevaluationClient,
    pub crm_persons: CrmPersonClient,
    pub crm_contacts: CrmContactClient,
    pub customer_contacts: CustomerContactClient,
}

impl ApiClients {
    pub fn connect(config: &ClientConfig, session: Session) -> Result<Self, ApiError> {
        Ok(Self::new(HttpClient::new(config, session)?))
    }

    pub fn new(http: HttpClient) -> Self {
        Self {
            auth: AuthClient::new(http.clone()),
            gl_types: GlTypeClient::new(http.clone()),
            tax_algorithms: TaxAlgorithmClient::new(http.clone()),
            purch_data: PurchDataClient::new(http.clone()),
            audit_trails: AuditTrailClient::new(http.clone()),
            supp_allocations: SuppAllocationClient::new(http.clone()),
            wo_issues: WoIssueClient::new(http.clone()),
            wo_issue_items: WoIssueItemClient::new(http.clone()),
            currency_revaluations: CurrencyRevaluationClient::new(http.clone()),
            crm_persons: CrmPersonClient::new(http.clone()),
            crm_contacts: CrmContactClient::new(http.clone()),
            customer_contacts: CustomerContactClient::new(http),
        }
    }

    /// Share `cache` across customer contact lookups.
    pub fn with_person_cache(mut self, cache: PersonCache) -> Self {
        self.customer_contacts = self.customer_contacts.with_cache(cache);
        self
    }

    pub fn session(&self) -> &Session {
        self.auth.session()
    }
}
