//! Application state shared across handlers.

use std::sync::Arc;

use crate::{config::AdminConfig, platform::PlatformClient, tracking::TrackingService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    platform: PlatformClient,
    tracking: TrackingService,
}

impl AppState {
    /// Build the application state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be constructed.
    pub fn new(config: AdminConfig) -> Result<Self, crate::platform::PlatformApiError> {
        let platform = PlatformClient::new(&config.platform)?;
        let tracking = TrackingService::new(config.tracking());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                platform,
                tracking,
            }),
        })
    }

    /// Application configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Platform backend client.
    #[must_use]
    pub fn platform(&self) -> &PlatformClient {
        &self.inner.platform
    }

    /// Tracking enrichment service.
    #[must_use]
    pub fn tracking(&self) -> &TrackingService {
        &self.inner.tracking
    }
}
