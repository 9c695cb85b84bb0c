//! Async driver executing the actions produced by the state machine.
//!
//! [`Gallery`] is the single owner of [`AppState`]. Presentation code calls its
//! action methods (`set_query`, `request_generation`, `request_submission`,
//! `refresh`) and reads state through [`Gallery::state`] or a
//! [`watch`](tokio::sync::watch) receiver. Timers and network calls run as
//! spawned tasks that report back over a channel. Nothing touches state until
//! the owner calls [`Gallery::pump`], so every transition happens on the
//! owner's task, one event at a time.
//!
//! ```text
//! set_query ──► handle_event ──► ScheduleFilter ──► sleep task ──┐
//! request_* ──► handle_event ──► PostToWorker   ──► worker task ─┤
//!                    ▲                                           │
//!                    └───────────── pump ◄──── event channel ◄───┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use artfeed::{Config, Gallery};
//!
//! # async fn run() -> artfeed::Result<()> {
//! let mut gallery = Gallery::from_config(&Config::default())?;
//! gallery.load().await?;
//! gallery.set_query("cat")?;
//! gallery.settle().await?;
//! println!("{} matches", gallery.state().filtered_view().len());
//! # Ok(())
//! # }
//! ```

use crate::api::{ApiClient, HttpApiClient};
use crate::app::{handle_event, Action, AppState, Event};
use crate::domain::{ArtfeedError, Field, NewPost, Result, ValidationError};
use crate::media;
use crate::worker::{FeedWorker, WorkerMessage, WorkerResponse};
use crate::Config;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::AbortHandle;

/// Capacity of the signal broadcast buffer.
const SIGNAL_CAPACITY: usize = 16;

/// One-shot notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// A post was persisted; navigate back to the feed.
    CreationComplete(NewPost),
    /// A user-visible message.
    Notify(String),
}

/// The debounce timer currently armed, with the ticket it will deliver.
#[derive(Debug)]
struct ArmedFilter {
    ticket: u64,
    handle: AbortHandle,
}

/// Owns application state and drives its side effects.
pub struct Gallery {
    state: AppState,
    api: Arc<dyn ApiClient>,
    worker: FeedWorker,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    filter_timer: Option<ArmedFilter>,
    in_flight: Vec<AbortHandle>,
    outstanding: usize,
    snapshot_tx: watch::Sender<AppState>,
    signals: broadcast::Sender<Signal>,
    last_notification: Option<String>,
}

impl Gallery {
    /// Creates a gallery over `api` with the given initial state.
    ///
    /// Must be called within a Tokio runtime; tasks are spawned on first use.
    #[must_use]
    pub fn new(api: Arc<dyn ApiClient>, state: AppState) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(state.clone());
        let (signals, _) = broadcast::channel(SIGNAL_CAPACITY);

        Self {
            state,
            worker: FeedWorker::new(Arc::clone(&api)),
            api,
            events_tx,
            events_rx,
            filter_timer: None,
            in_flight: Vec::new(),
            outstanding: 0,
            snapshot_tx,
            signals,
            last_notification: None,
        }
    }

    /// Builds an HTTP-backed gallery from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArtfeedError::Config`](crate::ArtfeedError::Config) if the base URL is unusable.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api = HttpApiClient::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self::new(Arc::new(api), crate::initialize(config)))
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// A receiver that observes every published state change.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<AppState> {
        self.snapshot_tx.subscribe()
    }

    /// A receiver for navigation and notification signals.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Signal> {
        self.signals.subscribe()
    }

    /// The most recent user-visible message, if any.
    #[must_use]
    pub fn last_notification(&self) -> Option<&str> {
        self.last_notification.as_deref()
    }

    /// Loads the feed and waits for the result.
    ///
    /// # Errors
    ///
    /// Returns the [`ArtfeedError::Network`](crate::ArtfeedError::Network) from the fetch. The previous
    /// snapshot is kept.
    pub async fn load(&mut self) -> Result<()> {
        let (changed, _) = handle_event(&mut self.state, &Event::Refresh)?;
        if changed {
            self.publish();
        }

        // Not a spawned task, so `outstanding` is left alone.
        match self.api.list_posts().await {
            Ok(posts) => {
                self.dispatch(&Event::WorkerResponse(WorkerResponse::PostsLoaded { posts }))?;
                Ok(())
            }
            Err(e) => {
                self.dispatch(&Event::WorkerResponse(WorkerResponse::LoadFailed {
                    message: e.to_string(),
                }))?;
                Err(e)
            }
        }
    }

    /// Downloads the image of the feed post `post_id` to `target`.
    ///
    /// Remote images are fetched through the API client. A directory target
    /// receives `download-<id>.<ext>`. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns [`ArtfeedError::PostNotFound`](crate::ArtfeedError::PostNotFound) if the
    /// post is not in the current snapshot, otherwise the fetch or write error.
    pub async fn download_post(&self, post_id: &str, target: &Path) -> Result<PathBuf> {
        let post = self
            .state
            .feed
            .posts()
            .iter()
            .find(|post| post.id == post_id)
            .ok_or_else(|| ArtfeedError::PostNotFound(post_id.to_string()))?;

        let image = self.api.fetch_image(&post.image_uri).await?;
        let file_name = media::post_file_name(&post.id, &image);
        media::write_image(&image, target, &file_name)
    }

    /// Reloads the feed in the background.
    ///
    /// # Errors
    ///
    /// Fails only after [`Gallery::dispose`].
    pub fn refresh(&mut self) -> Result<()> {
        self.apply(Event::Refresh).map(drop)
    }

    /// Records raw search input and schedules the debounced filter.
    ///
    /// # Errors
    ///
    /// Fails only after [`Gallery::dispose`].
    pub fn set_query(&mut self, text: &str) -> Result<()> {
        self.apply(Event::SetQuery(text.to_string())).map(drop)
    }

    /// Starts generating an image for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty prompt; state is unchanged.
    pub fn request_generation(&mut self, prompt: &str) -> Result<()> {
        self.apply(Event::RequestGeneration(prompt.to_string())).map(drop)
    }

    /// Shares the current generation under `author_name`.
    ///
    /// # Errors
    ///
    /// Returns a validation error listing every missing field; no request is
    /// made.
    pub fn request_submission(&mut self, author_name: &str) -> Result<()> {
        self.apply(Event::RequestSubmission(author_name.to_string())).map(drop)
    }

    /// Flips the light/dark preference.
    ///
    /// # Errors
    ///
    /// Fails only after [`Gallery::dispose`].
    pub fn toggle_theme(&mut self) -> Result<()> {
        self.apply(Event::ToggleTheme).map(drop)
    }

    /// Writes the current generated image to `target`.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming `photo` when no generation has
    /// succeeded, otherwise see [`media::save_image`].
    pub fn save_image(&self, target: &Path) -> Result<PathBuf> {
        let uri = self
            .state
            .generation
            .completed_image()
            .ok_or(ValidationError::MissingFields(vec![Field::Photo]))?;
        media::save_image(uri, target)
    }

    /// Cancels the debounce timer and abandons every in-flight request.
    ///
    /// Idempotent. Responses already queued are ignored when pumped.
    pub fn dispose(&mut self) {
        if let Err(e) = self.apply(Event::Dispose) {
            tracing::debug!(error = %e, "dispose rejected");
        }
    }

    /// Returns `true` while a timer is armed or a request is in flight.
    #[must_use]
    pub const fn has_pending_work(&self) -> bool {
        self.filter_timer.is_some() || self.outstanding > 0
    }

    /// Waits for the next timer expiry or completion and applies it.
    ///
    /// Returns whether state changed. Waits indefinitely when
    /// [`Gallery::has_pending_work`] is `false`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the state machine; timer and worker events do
    /// not produce any.
    pub async fn pump(&mut self) -> Result<bool> {
        match self.events_rx.recv().await {
            Some(event) => self.apply(event),
            None => Ok(false),
        }
    }

    /// Pumps until no timer is armed and no request is in flight.
    ///
    /// # Errors
    ///
    /// See [`Gallery::pump`].
    pub async fn settle(&mut self) -> Result<()> {
        while self.has_pending_work() {
            self.pump().await?;
        }
        Ok(())
    }

    fn apply(&mut self, event: Event) -> Result<bool> {
        match &event {
            Event::FilterDue { ticket } => {
                if self.filter_timer.as_ref().is_some_and(|armed| armed.ticket == *ticket) {
                    self.filter_timer = None;
                }
            }
            Event::WorkerResponse(_) => {
                self.outstanding = self.outstanding.saturating_sub(1);
            }
            _ => {}
        }
        self.dispatch(&event)
    }

    fn dispatch(&mut self, event: &Event) -> Result<bool> {
        let (changed, actions) = handle_event(&mut self.state, event)?;
        for action in actions {
            self.execute(action);
        }
        if changed {
            self.publish();
        }
        Ok(changed)
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::ScheduleFilter { ticket, delay } => self.arm_filter(ticket, delay),

            Action::CancelFilter => {
                if let Some(armed) = self.filter_timer.take() {
                    armed.handle.abort();
                    tracing::trace!(ticket = armed.ticket, "debounce timer cancelled");
                }
            }

            Action::PostToWorker(message) => self.spawn_worker(message),

            Action::AbandonInFlight => {
                for handle in self.in_flight.drain(..) {
                    handle.abort();
                }
                self.outstanding = 0;
            }

            Action::CreationComplete { post } => {
                let _ = self.signals.send(Signal::CreationComplete(post));
            }

            Action::Notify(message) => {
                tracing::info!(message = %message, "notification");
                self.last_notification = Some(message.clone());
                let _ = self.signals.send(Signal::Notify(message));
            }
        }
    }

    fn arm_filter(&mut self, ticket: u64, delay: Duration) {
        if let Some(previous) = self.filter_timer.take() {
            previous.handle.abort();
        }

        let tx = self.events_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Event::FilterDue { ticket });
        });

        self.filter_timer = Some(ArmedFilter {
            ticket,
            handle: task.abort_handle(),
        });
    }

    fn spawn_worker(&mut self, message: WorkerMessage) {
        self.in_flight.retain(|handle| !handle.is_finished());

        let worker = self.worker.clone();
        let tx = self.events_tx.clone();
        let operation = message.operation();
        let task = tokio::spawn(async move {
            let response = worker.handle_message(message).await;
            let _ = tx.send(Event::WorkerResponse(response));
        });

        tracing::debug!(operation = operation, "worker task spawned");
        self.in_flight.push(task.abort_handle());
        self.outstanding += 1;
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.state.clone());
    }
}

impl Drop for Gallery {
    fn drop(&mut self) {
        if let Some(armed) = self.filter_timer.take() {
            armed.handle.abort();
        }
        for handle in self.in_flight.drain(..) {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for Gallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("state", &self.state)
            .field("outstanding", &self.outstanding)
            .field("filter_armed", &self.filter_timer.is_some())
            .finish_non_exhaustive()
    }
}

