//! Shared state for the export handlers

use crate::core::orchestrator::Orchestrator;
use std::sync::Arc;

/// State available to every handler
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// Wrap an orchestrator for sharing across requests
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// The orchestrator
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}
