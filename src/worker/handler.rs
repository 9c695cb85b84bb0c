//! Worker implementation executing network operations.
//!
//! [`FeedWorker`] turns a [`WorkerMessage`] into exactly one API call and
//! reports the outcome as a [`WorkerResponse`]. It never retries and holds no
//! state besides the client it calls through.

use crate::api::ApiClient;
use crate::domain::Result;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::Arc;

/// Executes worker messages against an [`ApiClient`].
#[derive(Clone)]
pub struct FeedWorker {
    api: Arc<dyn ApiClient>,
}

impl FeedWorker {
    /// Creates a worker calling through `api`.
    #[must_use]
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    /// Maps an API result onto a response with consistent logging.
    fn handle_api_result<T, S, F>(
        operation: &str,
        result: Result<T>,
        on_success: S,
        on_failure: F,
    ) -> WorkerResponse
    where
        S: FnOnce(T) -> WorkerResponse,
        F: FnOnce(String) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "api operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "api operation failed");
                on_failure(e.to_string())
            }
        }
    }

    /// Processes one message and returns its response.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let operation = message.operation();

        match message {
            WorkerMessage::LoadPosts => Self::handle_api_result(
                operation,
                self.api.list_posts().await,
                |posts| WorkerResponse::PostsLoaded { posts },
                |message| WorkerResponse::LoadFailed { message },
            ),

            WorkerMessage::GenerateImage { token, prompt } => Self::handle_api_result(
                operation,
                self.api.generate_image(&prompt).await,
                |photo| WorkerResponse::ImageGenerated { token, photo },
                |reason| WorkerResponse::GenerationFailed { token, reason },
            ),

            WorkerMessage::CreatePost { attempt, post } => {
                let result = self.api.create_post(&post).await;
                Self::handle_api_result(
                    operation,
                    result,
                    |()| WorkerResponse::PostCreated { attempt, post },
                    |reason| WorkerResponse::CreateFailed { attempt, reason },
                )
            }
        }
    }
}

impl std::fmt::Debug for FeedWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedWorker").finish_non_exhaustive()
    }
}
