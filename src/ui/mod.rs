//! Presentation-facing layer: view models, theme mode, and text rendering.
//!
//! ```text
//! AppState → compute_feed_viewmodel → FeedViewModel → render_feed → String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready types read by any presentation layer
//! - [`renderer`]: Plain-terminal renderers used by the CLI
//! - [`helpers`]: Query match ranges, highlighting, truncation
//! - [`theme`]: Light/dark preference with a pure toggle

pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render_create, render_feed};
pub use theme::{Palette, ThemeMode};
pub use viewmodel::{CardItem, CreateViewModel, EmptyState, FeedViewModel};
