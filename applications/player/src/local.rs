/// In-process step source for running without a step service
use async_trait::async_trait;
use sortvis_core::{FetchError, SortRequest, StepFetcher, StepSequence};

/// Generates traces locally with `sortvis-steps`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFetcher;

#[async_trait]
impl StepFetcher for LocalFetcher {
    async fn fetch(&self, request: &SortRequest) -> Result<StepSequence, FetchError> {
        let request = request.clone();
        tokio::task::spawn_blocking(move || sortvis_steps::generate_for(&request))
            .await
            .map_err(|e| FetchError::Transport(format!("generator task failed: {}", e)))?
            .map_err(FetchError::from)
    }
}
