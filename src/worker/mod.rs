//! Background worker for network operations.
//!
//! - `messages`: Request/response protocol between state machine and worker
//! - `handler`: Worker implementation executing requests through an `ApiClient`

pub mod handler;
pub mod messages;

pub use handler::FeedWorker;
pub use messages::{WorkerMessage, WorkerResponse};
