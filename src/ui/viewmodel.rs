//! View model types representing renderable feed state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) and carry
//! display-ready data only. They are what a presentation layer reads; it
//! never needs to know about tickets, tokens, or pending queries.

use crate::app::modes::Phase;

/// Complete view model for the feed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedViewModel {
    /// `true` while a feed load is in flight.
    pub loading: bool,

    /// "Showing results for ..." heading when a query is active.
    pub heading: Option<String>,

    /// Cards to display, in feed order.
    pub cards: Vec<CardItem>,

    /// Empty-state title when there are no cards.
    pub empty_state: Option<EmptyState>,

    /// Message from the last failed load, if any.
    pub error: Option<String>,
}

/// One post as shown in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub id: String,
    pub author_name: String,
    /// Upper-cased first character of the author name, for the avatar.
    pub initial: String,
    pub prompt: String,
    pub image_uri: String,
    /// Character ranges of the settled query inside `author_name`.
    pub author_highlights: Vec<(usize, usize)>,
    /// Character ranges of the settled query inside `prompt`.
    pub prompt_highlights: Vec<(usize, usize)>,
}

/// Message shown when nothing matches or nothing was posted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: String,
}

/// View model for the create page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateViewModel {
    pub generating: bool,
    pub sharing: bool,
    /// Image to preview; `None` shows the placeholder.
    pub preview: Option<String>,
    /// Label of the generate button.
    pub generate_label: &'static str,
    /// Label of the share button.
    pub share_label: &'static str,
    pub error: Option<String>,
}

impl CreateViewModel {
    pub(crate) fn from_phases(
        generation: Phase,
        submission: Phase,
        preview: Option<String>,
        error: Option<String>,
    ) -> Self {
        let generating = generation.is_pending();
        let sharing = submission.is_pending();
        Self {
            generating,
            sharing,
            preview,
            generate_label: if generating { "Generating..." } else { "Generate Image" },
            share_label: if sharing { "Sharing..." } else { "Share with the Community" },
            error,
        }
    }
}
