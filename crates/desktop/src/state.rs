//! Application state shared by every screen.

use anyhow::Context;

use ledgerdesk_auth::Session;
use ledgerdesk_client::resources::PersonCache;
use ledgerdesk_client::{ApiClients, ClientConfig};
use ledgerdesk_storage::Storage;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub storage: Storage,
    pub session: Session,
    pub clients: ApiClients,
}

impl AppState {
    /// Build from the environment: `LEDGERDESK_API_URL`,
    /// `LEDGERDESK_TIMEOUT_SECS` and `LEDGERDESK_DATA_DIR`.
    pub fn from_env() -> anyhow::Result<Self> {
        let storage = Storage::open_default().context("failed to open local storage")?;
        Self::new(ClientConfig::from_env(), storage)
    }

    /// Restore the session from `storage` and wire the clients to it.
    pub fn new(config: ClientConfig, storage: Storage) -> anyhow::Result<Self> {
        let session = Session::restore(&storage);
        let clients = ApiClients::connect(&config, session.clone())
            .context("failed to build API clients")?
            .with_person_cache(PersonCache::new());

        tracing::info!(
            api_url = %config.base_url(),
            authenticated = session.is_authenticated(),
            "application state initialized"
        );

        Ok(Self {
            config,
            storage,
            session,
            clients,
        })
    }
}
