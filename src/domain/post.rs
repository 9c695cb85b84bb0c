//! Post domain model.
//!
//! A [`Post`] pairs an author, the prompt they used, and the generated image.
//! Posts are immutable once created and identified by their server-assigned
//! `id`. [`NewPost`] is the payload sent when persisting a fresh generation.

use serde::{Deserialize, Serialize};

/// A persisted feed entry.
///
/// Field names follow the HTTP contract: the identifier arrives as `_id`,
/// the author as `name`, and the image as `photo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "name")]
    pub author_name: String,
    pub prompt: String,
    #[serde(rename = "photo")]
    pub image_uri: String,
}

impl Post {
    /// Creates a post with the given fields.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        author_name: impl Into<String>,
        prompt: impl Into<String>,
        image_uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author_name: author_name.into(),
            prompt: prompt.into(),
            image_uri: image_uri.into(),
        }
    }

    /// Returns whether the post matches an already lower-cased query.
    ///
    /// A post matches when its author name or prompt, lower-cased, contains
    /// the query. The empty query matches every post.
    ///
    /// # Examples
    ///
    /// ```
    /// use artfeed::domain::Post;
    ///
    /// let post = Post::new("1", "Alice", "A Cat", "https://img/1.png");
    /// assert!(post.matches_lowercase("ca"));
    /// assert!(post.matches_lowercase("alice"));
    /// assert!(!post.matches_lowercase("dog"));
    /// ```
    #[must_use]
    pub fn matches_lowercase(&self, query_lower: &str) -> bool {
        query_lower.is_empty()
            || self.author_name.to_lowercase().contains(query_lower)
            || self.prompt.to_lowercase().contains(query_lower)
    }
}

/// Body of the create-post request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub name: String,
    pub prompt: String,
    pub photo: String,
}
