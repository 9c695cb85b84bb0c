//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the client. It composes the
//! Feed Store, the Search Engine, and the two workflow states, and is mutated
//! only by [`handle_event`](super::handle_event).
//!
//! # State Components
//!
//! - **Feed**: cached posts newest-first, load bookkeeping
//! - **Search**: raw input, settled query, parked query, filtered view
//! - **Generation**: prompt → image workflow with its request token
//! - **Submission**: persist-as-post workflow with its attempt number
//! - **Theme**: light/dark preference
//!
//! # Example
//!
//! ```rust
//! use artfeed::app::AppState;
//! use artfeed::ui::ThemeMode;
//! use std::time::Duration;
//!
//! let state = AppState::new(ThemeMode::Light, Duration::from_millis(500));
//! let vm = state.compute_feed_viewmodel();
//! assert!(vm.cards.is_empty());
//! ```

use super::feed::FeedStore;
use super::search::SearchEngine;
use super::workflow::{GenerationState, SubmissionState};
use crate::domain::Post;
use crate::ui::helpers::match_ranges;
use crate::ui::theme::ThemeMode;
use crate::ui::viewmodel::{CardItem, CreateViewModel, EmptyState, FeedViewModel};
use std::time::Duration;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Cached post collection.
    pub feed: FeedStore,

    /// Debounced search over `feed`.
    pub search: SearchEngine,

    /// Prompt → image workflow.
    pub generation: GenerationState,

    /// Persist-as-post workflow.
    pub submission: SubmissionState,

    /// Light/dark preference.
    pub theme: ThemeMode,

    /// Quiet period before a non-empty query is applied.
    pub debounce: Duration,

    /// Set once the owning context is torn down; all later completions are
    /// ignored and all later requests refused.
    pub disposed: bool,
}

impl AppState {
    /// Creates an empty state with an unloaded feed and idle workflows.
    #[must_use]
    pub fn new(theme: ThemeMode, debounce: Duration) -> Self {
        Self {
            feed: FeedStore::default(),
            search: SearchEngine::default(),
            generation: GenerationState::default(),
            submission: SubmissionState::default(),
            theme,
            debounce,
            disposed: false,
        }
    }

    /// The current filtered view.
    ///
    /// Always a subsequence of the feed snapshot; empty before the first load.
    #[must_use]
    pub fn filtered_view(&self) -> &[Post] {
        &self.search.filtered
    }

    /// Computes the feed page view model.
    ///
    /// With an active query the cards come from the settled filtered view and
    /// a "Showing results for" heading echoes the raw input; otherwise the
    /// whole feed is shown.
    #[must_use]
    pub fn compute_feed_viewmodel(&self) -> FeedViewModel {
        let query = self.search.raw_query.as_str();
        let highlight_query = self.search.settled_query.as_deref().unwrap_or("");

        let (posts, heading, empty_title) = if query.is_empty() {
            (self.feed.posts(), None, "No Posts Yet")
        } else {
            (
                self.filtered_view(),
                Some(format!("Showing results for {query}")),
                "No Search Results Found",
            )
        };

        let cards: Vec<CardItem> = posts
            .iter()
            .map(|post| Self::compute_card(post, highlight_query))
            .collect();

        let empty_state = if cards.is_empty() {
            Some(EmptyState {
                title: empty_title.to_string(),
            })
        } else {
            None
        };

        FeedViewModel {
            loading: self.feed.is_loading(),
            heading,
            cards,
            empty_state,
            error: self.feed.last_error.clone(),
        }
    }

    fn compute_card(post: &Post, query: &str) -> CardItem {
        let initial = post
            .author_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect::<String>())
            .unwrap_or_default();

        CardItem {
            id: post.id.clone(),
            author_name: post.author_name.clone(),
            initial,
            prompt: post.prompt.clone(),
            image_uri: post.image_uri.clone(),
            author_highlights: match_ranges(&post.author_name, query),
            prompt_highlights: match_ranges(&post.prompt, query),
        }
    }

    /// Computes the create page view model.
    #[must_use]
    pub fn compute_create_viewmodel(&self) -> CreateViewModel {
        let error = self
            .submission
            .error_reason
            .clone()
            .or_else(|| self.generation.error_reason.clone());

        CreateViewModel::from_phases(
            self.generation.phase,
            self.submission.phase,
            self.generation.completed_image().map(str::to_string),
            error,
        )
    }
}
