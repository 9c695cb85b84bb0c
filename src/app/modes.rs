//! Workflow phase type shared by the generation and submission state machines.
//!
//! ```text
//! Idle ──▶ Pending ──▶ Succeeded
//!             ▲   └──▶ Failed
//!             └──────────┘ (re-enterable from Succeeded or Failed)
//! ```
//!
//! There is no permanent terminal phase: every workflow can be started again
//! by a new explicit request.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of one workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing has been requested yet.
    #[default]
    Idle,

    /// A request is in flight.
    Pending,

    /// The last request completed successfully.
    Succeeded,

    /// The last request failed; it may be re-issued.
    Failed,
}

impl Phase {
    /// Returns `true` while a request is in flight.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}
