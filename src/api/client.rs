//! The API Client seam.
//!
//! [`ApiClient`] is the only boundary through which the state layer reaches
//! the remote services. It shapes requests and responses and nothing else:
//! no retries, no caching, no state.

use crate::domain::{NewPost, Post, Result};
use crate::media::{self, DecodedImage};
use async_trait::async_trait;

/// Remote operations needed by the feed and creation workflows.
///
/// Implementations map failures onto the error taxonomy:
///
/// - [`list_posts`](Self::list_posts) and [`create_post`](Self::create_post)
///   fail with [`ArtfeedError::Network`](crate::domain::ArtfeedError::Network)
/// - [`generate_image`](Self::generate_image) fails with
///   [`ArtfeedError::Generation`](crate::domain::ArtfeedError::Generation)
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Fetches the full post collection in server order (oldest first).
    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// Generates an image for `prompt`, returning its data string.
    async fn generate_image(&self, prompt: &str) -> Result<String>;

    /// Persists a new post.
    async fn create_post(&self, post: &NewPost) -> Result<()>;

    /// Resolves a post's image to bytes.
    ///
    /// The default only understands `data:` URIs; clients that can reach
    /// remote hosts override it.
    async fn fetch_image(&self, uri: &str) -> Result<DecodedImage> {
        media::decode_data_uri(uri)
    }
}
