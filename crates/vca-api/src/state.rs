use std::sync::Arc;
use vca_retrieval::PipelineOrchestrator;

use crate::config::ApiConfig;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PipelineOrchestrator>,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(pipeline: PipelineOrchestrator, config: ApiConfig) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            config,
        }
    }
}
