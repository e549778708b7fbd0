use std::sync::Arc;

use tracing::{info, warn};

use mandi_ai::{CatalogTranslator, CompletionClient};
use mandi_infra::{
    AppConfig, BroadcastSimulator, CatalogStore, GeminiClient, InMemoryCatalogStore, InMemoryLogStore, LogStore,
};

pub type SharedClient = Arc<dyn CompletionClient>;

/// Everything the handlers need, shared behind one `Arc`.
pub struct AppServices {
    pub translator: CatalogTranslator<SharedClient>,
    pub catalogs: Arc<dyn CatalogStore>,
    pub logs: Arc<dyn LogStore>,
    pub simulator: BroadcastSimulator,
}

impl AppServices {
    /// Wire in-memory stores around an explicit completion client
    /// (`None` = capability not configured).
    pub fn with_client(config: &AppConfig, client: Option<SharedClient>) -> Self {
        let catalogs: Arc<dyn CatalogStore> = Arc::new(InMemoryCatalogStore::new());
        let logs: Arc<dyn LogStore> = Arc::new(InMemoryLogStore::new());
        let simulator = BroadcastSimulator::new(catalogs.clone(), logs.clone(), config.broadcast.clone());

        Self {
            translator: CatalogTranslator::new(client, config.retry.clone()),
            catalogs,
            logs,
            simulator,
        }
    }
}

/// Build services from configuration, using Gemini when an API key is set.
pub fn build_services(config: &AppConfig) -> AppServices {
    let client: Option<SharedClient> = match &config.gemini {
        Some(gemini) => match GeminiClient::new(gemini.clone()) {
            Ok(c) => {
                info!(model = %gemini.model, "gemini completion client configured");
                Some(Arc::new(c))
            }
            Err(e) => {
                warn!(error = %e, "failed to build gemini client; translations will use the fallback catalog");
                None
            }
        },
        None => {
            warn!("GEMINI_API_KEY not set; translations will use the fallback catalog");
            None
        }
    };

    AppServices::with_client(config, client)
}
