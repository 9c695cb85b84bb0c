//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never performs I/O or touches timers.
//! It returns a `Vec<Action>` and the runtime executes them in order.
//!
//! # Example
//!
//! ```rust
//! use artfeed::app::Action;
//! use artfeed::worker::WorkerMessage;
//!
//! let actions = vec![Action::PostToWorker(WorkerMessage::LoadPosts)];
//! ```

use crate::domain::NewPost;
use crate::worker::WorkerMessage;
use std::time::Duration;

/// Commands for the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Arm the debounce timer for `ticket`, cancelling any armed timer.
    ///
    /// When it fires the runtime feeds back `Event::FilterDue { ticket }`.
    ScheduleFilter {
        ticket: u64,
        delay: Duration,
    },

    /// Cancel the armed debounce timer so it never fires.
    CancelFilter,

    /// Run a network operation in the background.
    PostToWorker(WorkerMessage),

    /// Abort every in-flight background operation.
    AbandonInFlight,

    /// A post was created; the presentation layer may navigate back to the
    /// feed.
    CreationComplete {
        post: NewPost,
    },

    /// A user-visible message.
    Notify(String),
}
