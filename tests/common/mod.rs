//! Shared fixtures for integration tests.

#![allow(dead_code)]

use artfeed::api::ApiClient;
use artfeed::domain::{ArtfeedError, NewPost, Post, Result};
use artfeed::{AppState, Gallery, ThemeMode};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Server-order feed from the worked example: Alice's cat, then Bob's dog.
pub fn sample_posts() -> Vec<Post> {
    vec![
        Post::new("1", "Alice", "a cat", "https://img/1.png"),
        Post::new("2", "Bob", "a dog", "https://img/2.png"),
    ]
}

#[derive(Debug, Clone)]
struct Scripted<T> {
    delay: Duration,
    outcome: std::result::Result<T, String>,
}

/// In-memory [`ApiClient`] whose responses and latencies are scripted.
///
/// Latencies use `tokio::time::sleep`, so tests running with paused time
/// control exactly when each response arrives.
#[derive(Debug)]
pub struct ScriptedApi {
    feed: Mutex<Scripted<Vec<Post>>>,
    queued_feeds: Mutex<VecDeque<Scripted<Vec<Post>>>>,
    generations: Mutex<HashMap<String, Scripted<String>>>,
    create: Mutex<Scripted<()>>,
    pub created: Mutex<Vec<NewPost>>,
    pub list_calls: AtomicUsize,
    pub generate_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self {
            feed: Mutex::new(Scripted { delay: Duration::ZERO, outcome: Ok(sample_posts()) }),
            queued_feeds: Mutex::new(VecDeque::new()),
            generations: Mutex::new(HashMap::new()),
            create: Mutex::new(Scripted { delay: Duration::ZERO, outcome: Ok(()) }),
            created: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
            generate_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
        }
    }
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn feed_after(&self, delay: Duration, posts: Vec<Post>) {
        *self.feed.lock().unwrap() = Scripted { delay, outcome: Ok(posts) };
    }

    /// Scripts the next list call only; later calls fall back to the
    /// standing feed script.
    pub fn queue_feed(&self, delay: Duration, posts: Vec<Post>) {
        self.queued_feeds.lock().unwrap().push_back(Scripted { delay, outcome: Ok(posts) });
    }

    pub fn feed_fails(&self, message: &str) {
        *self.feed.lock().unwrap() = Scripted { delay: Duration::ZERO, outcome: Err(message.into()) };
    }

    pub fn image_after(&self, prompt: &str, delay: Duration, photo: &str) {
        self.generations
            .lock()
            .unwrap()
            .insert(prompt.into(), Scripted { delay, outcome: Ok(photo.into()) });
    }

    pub fn image_fails(&self, prompt: &str, delay: Duration, reason: &str) {
        self.generations
            .lock()
            .unwrap()
            .insert(prompt.into(), Scripted { delay, outcome: Err(reason.into()) });
    }

    pub fn create_fails(&self, reason: &str) {
        *self.create.lock().unwrap() = Scripted { delay: Duration::ZERO, outcome: Err(reason.into()) };
    }

    pub fn create_succeeds(&self) {
        *self.create.lock().unwrap() = Scripted { delay: Duration::ZERO, outcome: Ok(()) };
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApiClient for ScriptedApi {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let queued = self.queued_feeds.lock().unwrap().pop_front();
        let script = queued.unwrap_or_else(|| self.feed.lock().unwrap().clone());
        tokio::time::sleep(script.delay).await;
        script.outcome.map_err(ArtfeedError::Network)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        let script = self.generations.lock().unwrap().get(prompt).cloned().unwrap_or(Scripted {
            delay: Duration::ZERO,
            outcome: Ok(format!("data:image/png;base64,{}", prompt.len())),
        });
        tokio::time::sleep(script.delay).await;
        script.outcome.map_err(ArtfeedError::Generation)
    }

    async fn create_post(&self, post: &NewPost) -> Result<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let script = self.create.lock().unwrap().clone();
        tokio::time::sleep(script.delay).await;
        script.outcome.map_err(ArtfeedError::Network)?;
        self.created.lock().unwrap().push(post.clone());
        Ok(())
    }
}

pub fn gallery(api: &Arc<ScriptedApi>) -> Gallery {
    let api: Arc<dyn ApiClient> = Arc::clone(api) as Arc<dyn ApiClient>;
    Gallery::new(api, AppState::new(ThemeMode::Light, DEBOUNCE))
}

pub fn ids(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.id.as_str()).collect()
}
