//! `reqwest`-backed implementation of [`ApiClient`].
//!
//! | Operation      | Request                 | Success body          |
//! |----------------|-------------------------|-----------------------|
//! | list posts     | `GET  /api/v1/post`     | `{ "data": [Post] }`  |
//! | generate image | `POST /api/v1/dalle`    | `{ "photo": "..." }`  |
//! | create post    | `POST /api/v1/post`     | created-post echo     |
//!
//! Feed images hosted elsewhere are fetched with a plain `GET` on their URL.

use super::client::ApiClient;
use crate::domain::{ArtfeedError, NewPost, Post, Result};
use crate::media::{self, DecodedImage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const POSTS_PATH: &str = "/api/v1/post";
const GENERATE_PATH: &str = "/api/v1/dalle";

/// HTTP client for the image-sharing backend.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    /// Creates a client rooted at `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ArtfeedError::Config`] if `base_url` is empty or not an
    /// `http(s)` URL, or if the underlying client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ArtfeedError::Config("base_url is empty".to_string()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ArtfeedError::Config(format!(
                "base_url must start with http:// or https://, got {base_url}"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ArtfeedError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct ListPostsResponse {
    data: Vec<Post>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    photo: Option<String>,
}

fn network(e: impl std::fmt::Display) -> ArtfeedError {
    ArtfeedError::Network(e.to_string())
}

fn generation(e: impl std::fmt::Display) -> ArtfeedError {
    ArtfeedError::Generation(e.to_string())
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let url = self.url(POSTS_PATH);
        tracing::debug!(url = %url, "fetching posts");

        let response = self.client.get(&url).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ArtfeedError::Network(format!("list posts returned {status}")));
        }

        let body: ListPostsResponse = response.json().await.map_err(network)?;
        tracing::debug!(count = body.data.len(), "posts fetched");
        Ok(body.data)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let url = self.url(GENERATE_PATH);
        tracing::debug!(url = %url, prompt_len = prompt.len(), "requesting image generation");

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest { prompt })
            .send()
            .await
            .map_err(generation)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ArtfeedError::Generation(format!(
                "image service returned {status}"
            )));
        }

        let body: GenerateResponse = response.json().await.map_err(generation)?;
        match body.photo {
            Some(photo) if !photo.is_empty() => Ok(photo),
            _ => Err(ArtfeedError::Generation(
                "image service returned no image".to_string(),
            )),
        }
    }

    async fn create_post(&self, post: &NewPost) -> Result<()> {
        let url = self.url(POSTS_PATH);
        tracing::debug!(url = %url, author = %post.name, "creating post");

        let response = self
            .client
            .post(&url)
            .json(post)
            .send()
            .await
            .map_err(network)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ArtfeedError::Network(format!("create post returned {status}")))
        }
    }

    async fn fetch_image(&self, uri: &str) -> Result<DecodedImage> {
        if uri.starts_with("data:") {
            return media::decode_data_uri(uri);
        }
        tracing::debug!(url = %uri, "downloading image");

        let response = self.client.get(uri).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ArtfeedError::Network(format!("image download returned {status}")));
        }

        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map_or_else(|| "image/png".to_string(), |value| value.trim().to_string());
        let bytes = response.bytes().await.map_err(network)?;

        Ok(DecodedImage {
            mime,
            bytes: bytes.to_vec(),
        })
    }
}
