//! Domain layer for the artfeed client.
//!
//! Core types independent of HTTP, timers, or presentation concerns.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`post`]: Post model and the search predicate
//! - [`prompt`]: Prompt validation and "surprise me" suggestions
//!
//! # Examples
//!
//! ```
//! use artfeed::domain::{Post, Result};
//!
//! fn first_post() -> Result<Post> {
//!     Ok(Post::new("1", "Alice", "a cat", "https://img/1.png"))
//! }
//! ```

pub mod error;
pub mod post;
pub mod prompt;

pub use error::{ArtfeedError, Field, Result, ValidationError};
pub use post::{NewPost, Post};
