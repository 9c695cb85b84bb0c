//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only writer of [`AppState`]. Requests from the
//! presentation layer, timer expiries, and worker completions all arrive as
//! [`Event`]s and are processed one at a time:
//!
//! 1. Pattern-match the event
//! 2. Validate and mutate state
//! 3. Return actions for the runtime to execute
//!
//! Validation failures are returned as errors before any state changes, so a
//! rejected request never consumes a token or touches network state.
//!
//! Completions are matched against the state that issued them. A generation
//! result whose token is no longer current, a submission result for an older
//! attempt, or any completion after [`Event::Dispose`] is dropped without
//! mutation.
//!
//! # Example
//!
//! ```rust
//! use artfeed::app::{handle_event, Action, AppState, Event};
//! use artfeed::ui::ThemeMode;
//! use std::time::Duration;
//!
//! let mut state = AppState::new(ThemeMode::Light, Duration::from_millis(500));
//! let (changed, actions) = handle_event(&mut state, &Event::Refresh)?;
//! assert!(changed);
//! assert!(matches!(actions[0], Action::PostToWorker(_)));
//! # Ok::<(), artfeed::ArtfeedError>(())
//! ```

use crate::app::search::QueryOutcome;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::prompt::is_blank;
use crate::domain::{Field, NewPost, ValidationError};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Load (or reload) the feed.
    Refresh,

    /// The search input changed.
    SetQuery(String),

    /// The debounce timer armed for `ticket` fired.
    FilterDue {
        ticket: u64,
    },

    /// Generate an image for a prompt.
    RequestGeneration(String),

    /// Persist the current generation under an author name.
    RequestSubmission(String),

    /// Flip the light/dark preference.
    ToggleTheme,

    /// The owning context is being torn down.
    Dispose,

    /// A background operation completed.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates state, and returns actions to execute.
///
/// The `bool` reports whether observable state changed.
///
/// # Errors
///
/// Returns [`ValidationError`] (wrapped in `ArtfeedError::Validation`) for an
/// empty prompt, missing submission fields, a submission already in flight,
/// or any request after disposal. State is unchanged in every error case.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    if state.disposed {
        return match event {
            Event::FilterDue { .. } | Event::WorkerResponse(_) | Event::Dispose => {
                tracing::debug!("ignoring event after dispose");
                Ok((false, vec![]))
            }
            _ => Err(ValidationError::Disposed.into()),
        };
    }

    match event {
        Event::Refresh => {
            state.feed.begin_load();
            tracing::debug!(loads_in_flight = state.feed.loads_in_flight, "feed load issued");
            Ok((true, vec![Action::PostToWorker(WorkerMessage::LoadPosts)]))
        }

        Event::SetQuery(text) => {
            let outcome = state.search.set_query(text, state.feed.snapshot.as_deref());
            tracing::trace!(query = %text, "search query updated");

            let action = match outcome {
                QueryOutcome::Schedule(ticket) => Action::ScheduleFilter {
                    ticket,
                    delay: state.debounce,
                },
                QueryOutcome::Resolved => Action::CancelFilter,
            };
            Ok((true, vec![action]))
        }

        Event::FilterDue { ticket } => {
            let applied = state.search.settle_due(*ticket, state.feed.snapshot.as_deref());
            if !applied {
                tracing::debug!(ticket = ticket, "stale filter ticket, ignoring");
            }
            Ok((applied, vec![]))
        }

        Event::RequestGeneration(prompt) => {
            if is_blank(prompt) {
                tracing::debug!("generation rejected: empty prompt");
                return Err(ValidationError::EmptyPrompt.into());
            }

            let token = state.generation.begin(prompt);
            tracing::debug!(token = token, "generation requested");
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::GenerateImage {
                    token,
                    prompt: prompt.clone(),
                })],
            ))
        }

        Event::RequestSubmission(author_name) => {
            if state.submission.phase.is_pending() {
                return Err(ValidationError::SubmissionPending.into());
            }

            let photo = state.generation.completed_image();

            let mut missing = Vec::new();
            if is_blank(author_name) {
                missing.push(Field::Name);
            }
            if photo.is_none() {
                missing.push(Field::Photo);
            }

            let Some(photo) = photo.filter(|_| missing.is_empty()) else {
                tracing::debug!(missing = ?missing, "submission rejected");
                return Err(ValidationError::MissingFields(missing).into());
            };

            let post = NewPost {
                name: author_name.clone(),
                prompt: state.generation.prompt.clone(),
                photo: photo.to_string(),
            };
            let attempt = state.submission.begin();
            tracing::debug!(attempt = attempt, token = state.generation.token, "submission requested");

            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::CreatePost { attempt, post })],
            ))
        }

        Event::ToggleTheme => {
            state.theme = state.theme.toggle();
            tracing::debug!(theme = state.theme.name(), "theme toggled");
            Ok((true, vec![]))
        }

        Event::Dispose => {
            state.disposed = true;
            state.search.cancel();
            tracing::debug!("disposed, abandoning timers and in-flight requests");
            Ok((true, vec![Action::CancelFilter, Action::AbandonInFlight]))
        }

        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn handle_worker_response(
    state: &mut AppState,
    response: &WorkerResponse,
) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::PostsLoaded { posts } => {
            state.feed.apply_loaded(posts.clone());
            state.search.refilter(state.feed.posts());
            tracing::debug!(
                post_count = posts.len(),
                filtered_count = state.search.filtered.len(),
                "feed loaded"
            );
            Ok((true, vec![]))
        }

        WorkerResponse::LoadFailed { message } => {
            tracing::warn!(error = %message, "feed load failed");
            state.feed.apply_failed(message.clone());
            Ok((true, vec![Action::Notify(message.clone())]))
        }

        WorkerResponse::ImageGenerated { token, photo } => {
            if !state.generation.accepts(*token) {
                tracing::warn!(token = token, current = state.generation.token, "discarding stale generation result");
                return Ok((false, vec![]));
            }
            state.generation.succeed(photo.clone());
            tracing::debug!(token = token, "generation succeeded");
            Ok((true, vec![]))
        }

        WorkerResponse::GenerationFailed { token, reason } => {
            if !state.generation.accepts(*token) {
                tracing::warn!(token = token, current = state.generation.token, "discarding stale generation failure");
                return Ok((false, vec![]));
            }
            tracing::warn!(token = token, reason = %reason, "generation failed");
            state.generation.fail(reason.clone());
            Ok((true, vec![Action::Notify("Failed to generate image.".to_string())]))
        }

        WorkerResponse::PostCreated { attempt, post } => {
            if !state.submission.accepts(*attempt) {
                tracing::warn!(attempt = attempt, "discarding stale submission result");
                return Ok((false, vec![]));
            }
            state.submission.succeed();
            state.feed.begin_load();
            tracing::debug!(attempt = attempt, "post created, refreshing feed");
            Ok((
                true,
                vec![
                    Action::PostToWorker(WorkerMessage::LoadPosts),
                    Action::Notify("Shared successfully!".to_string()),
                    Action::CreationComplete { post: post.clone() },
                ],
            ))
        }

        WorkerResponse::CreateFailed { attempt, reason } => {
            if !state.submission.accepts(*attempt) {
                tracing::warn!(attempt = attempt, "discarding stale submission failure");
                return Ok((false, vec![]));
            }
            tracing::warn!(attempt = attempt, reason = %reason, "submission failed");
            state.submission.fail(reason.clone());
            Ok((true, vec![Action::Notify("Failed to share.".to_string())]))
        }
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Refresh => "refresh",
        Event::SetQuery(_) => "set_query",
        Event::FilterDue { .. } => "filter_due",
        Event::RequestGeneration(_) => "request_generation",
        Event::RequestSubmission(_) => "request_submission",
        Event::ToggleTheme => "toggle_theme",
        Event::Dispose => "dispose",
        Event::WorkerResponse(_) => "worker_response",
    }
}
