//! Generation and submission workflow states.
//!
//! Both are small state machines over [`Phase`]. The generation workflow
//! carries a monotonically increasing `token`; a completion is accepted only
//! while its token is still the current one and the workflow is pending.
//! Submission attempts are numbered the same way.

use super::modes::Phase;
use serde::{Deserialize, Serialize};

/// State of the prompt → image workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationState {
    pub phase: Phase,
    /// Prompt of the most recent accepted request.
    pub prompt: String,
    /// Image data, present only in [`Phase::Succeeded`].
    pub image_data: Option<String>,
    /// Failure reason, present only in [`Phase::Failed`].
    pub error_reason: Option<String>,
    /// Token of the most recent request; `0` before any request.
    pub token: u64,
}

impl GenerationState {
    /// Enters `Pending` for `prompt`, allocating and returning the next token.
    ///
    /// Any previous image is dropped: it is superseded by this request.
    pub fn begin(&mut self, prompt: &str) -> u64 {
        self.token += 1;
        self.phase = Phase::Pending;
        self.prompt = prompt.to_string();
        self.image_data = None;
        self.error_reason = None;
        self.token
    }

    /// Returns whether a completion carrying `token` may be applied.
    #[must_use]
    pub fn accepts(&self, token: u64) -> bool {
        self.phase.is_pending() && self.token == token
    }

    pub fn succeed(&mut self, image_data: String) {
        self.phase = Phase::Succeeded;
        self.image_data = Some(image_data);
        self.error_reason = None;
    }

    pub fn fail(&mut self, reason: String) {
        self.phase = Phase::Failed;
        self.image_data = None;
        self.error_reason = Some(reason);
    }

    /// The submittable image: set only after a successful generation.
    #[must_use]
    pub fn completed_image(&self) -> Option<&str> {
        match self.phase {
            Phase::Succeeded => self.image_data.as_deref(),
            _ => None,
        }
    }
}

/// State of the persist-as-post workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionState {
    pub phase: Phase,
    pub error_reason: Option<String>,
    /// Number of the most recent attempt; `0` before any attempt.
    pub attempt: u64,
}

impl SubmissionState {
    pub fn begin(&mut self) -> u64 {
        self.attempt += 1;
        self.phase = Phase::Pending;
        self.error_reason = None;
        self.attempt
    }

    #[must_use]
    pub fn accepts(&self, attempt: u64) -> bool {
        self.phase.is_pending() && self.attempt == attempt
    }

    pub fn succeed(&mut self) {
        self.phase = Phase::Succeeded;
        self.error_reason = None;
    }

    pub fn fail(&mut self, reason: String) {
        self.phase = Phase::Failed;
        self.error_reason = Some(reason);
    }
}
