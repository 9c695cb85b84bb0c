//! Worker request/response protocol.
//!
//! The state machine never performs I/O itself. It emits [`WorkerMessage`]s,
//! the runtime hands them to the [`FeedWorker`](super::FeedWorker), and the
//! outcome comes back as a [`WorkerResponse`] event. Responses echo the
//! request's `token`/`attempt` so stale completions can be recognised.

use crate::domain::{NewPost, Post};
use serde::{Deserialize, Serialize};

/// Requests sent from the state machine to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Fetch the full post collection.
    LoadPosts,

    /// Generate an image for a prompt.
    GenerateImage {
        /// Generation token this request belongs to.
        token: u64,
        /// Prompt to send to the image service.
        prompt: String,
    },

    /// Persist a completed generation as a new post.
    CreatePost {
        /// Submission attempt this request belongs to.
        attempt: u64,
        /// Payload to persist.
        post: NewPost,
    },
}

impl WorkerMessage {
    /// Short operation name used in logs and spans.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::LoadPosts => "load posts",
            Self::GenerateImage { .. } => "generate image",
            Self::CreatePost { .. } => "create post",
        }
    }
}

/// Outcomes sent from the worker back to the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The post collection was fetched, in server order.
    PostsLoaded {
        posts: Vec<Post>,
    },

    /// Fetching the post collection failed.
    LoadFailed {
        message: String,
    },

    /// The image service returned an image.
    ImageGenerated {
        token: u64,
        photo: String,
    },

    /// Image generation failed.
    GenerationFailed {
        token: u64,
        reason: String,
    },

    /// The post was persisted.
    PostCreated {
        attempt: u64,
        post: NewPost,
    },

    /// Persisting the post failed.
    CreateFailed {
        attempt: u64,
        reason: String,
    },
}
