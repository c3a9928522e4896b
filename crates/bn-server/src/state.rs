//! Application state shared by the HTTP handlers and the stdio loop.

use crate::tools::ToolRegistry;
use bn_core::BeaunifiConfig;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state. Immutable after construction.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<BeaunifiConfig>,
    pub registry: Arc<ToolRegistry>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: BeaunifiConfig) -> Self {
        let registry = ToolRegistry::new(config.format.clone());
        Self::with_registry(config, registry)
    }

    pub fn with_registry(config: BeaunifiConfig, registry: ToolRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(BeaunifiConfig::default())
    }
}
