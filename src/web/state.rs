//! Application state shared across handlers

use crate::config::Settings;
use crate::locales::Translations;
use crate::lookup::Wikipedia;
use crate::metrics::Metrics;
use crate::network::HttpClient;
use crate::search::{OrchestratorOptions, SearchOrchestrator};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Settings
    pub settings: Arc<Settings>,
    /// Search orchestrator
    pub orchestrator: Arc<SearchOrchestrator>,
    /// Search statistics, also the orchestrator's observer
    pub metrics: Arc<Metrics>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
    /// UI messages
    pub translations: Arc<Translations>,
}

impl AppState {
    /// Create application state backed by Wikipedia
    pub fn new(settings: Settings, client: HttpClient) -> anyhow::Result<Self> {
        let wikipedia = Arc::new(Wikipedia::new(client, &settings.wikipedia));
        let metrics = Arc::new(Metrics::new());
        let orchestrator = SearchOrchestrator::new(wikipedia.clone(), wikipedia)
            .with_options(OrchestratorOptions::from_settings(&settings))
            .with_observer(metrics.clone());

        Self::with_orchestrator(settings, orchestrator, metrics)
    }

    /// Create application state around an existing orchestrator
    pub fn with_orchestrator(
        settings: Settings,
        orchestrator: SearchOrchestrator,
        metrics: Arc<Metrics>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            settings: Arc::new(settings),
            orchestrator: Arc::new(orchestrator),
            metrics,
            templates: Arc::new(super::Templates::new()?),
            translations: Arc::new(Translations::new()),
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }

    /// Configured UI locale
    pub fn locale(&self) -> &str {
        &self.settings.general.locale
    }

    /// Check if instance is public
    pub fn is_public(&self) -> bool {
        self.settings.server.public_instance
    }
}
