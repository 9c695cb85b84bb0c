//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the runtime (`runtime.rs`) and the domain, API,
//! and worker layers. It is pure: no I/O, no clocks, no tasks.
//!
//! # Architecture
//!
//! ```text
//! Requests → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── Timer / Worker Responses ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`feed`]: Feed Store holding the cached post snapshot
//! - [`search`]: Debounced Search Engine over the feed
//! - [`workflow`]: Generation and submission workflow states
//! - [`modes`]: The shared workflow [`Phase`]
//! - [`state`]: Central state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use artfeed::app::{handle_event, AppState, Event};
//! use artfeed::ui::ThemeMode;
//! use std::time::Duration;
//!
//! let mut state = AppState::new(ThemeMode::Light, Duration::from_millis(500));
//! let (_, actions) = handle_event(&mut state, &Event::SetQuery("cat".into()))?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), artfeed::ArtfeedError>(())
//! ```

pub mod actions;
pub mod feed;
pub mod handler;
pub mod modes;
pub mod search;
pub mod state;
pub mod workflow;

pub use actions::Action;
pub use feed::FeedStore;
pub use handler::{handle_event, Event};
pub use modes::Phase;
pub use search::{QueryOutcome, SearchEngine};
pub use state::AppState;
pub use workflow::{GenerationState, SubmissionState};
