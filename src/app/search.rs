//! Search Engine: debounced, case-insensitive filtering of the feed.
//!
//! The engine records raw input immediately and settles it later. Each
//! non-empty [`SearchEngine::set_query`] issues a fresh ticket and replaces
//! whatever filter was scheduled before, so at most one filter is ever
//! pending. The runtime arms a timer per ticket; when it fires,
//! [`SearchEngine::settle_due`] applies the query only if the ticket is still
//! the scheduled one.
//!
//! If the feed has not loaded when a query settles, the query is parked in
//! `pending_query` and replayed by [`SearchEngine::refilter`] once the feed
//! arrives. Until then the filtered view is empty.

use crate::domain::Post;

/// Returns the posts of `posts` whose author or prompt contains `query`,
/// case-insensitively, preserving order.
///
/// # Examples
///
/// ```
/// use artfeed::app::search::filter_posts;
/// use artfeed::domain::Post;
///
/// let feed = vec![
///     Post::new("1", "Alice", "a cat", "u1"),
///     Post::new("2", "Bob", "a dog", "u2"),
/// ];
/// let hits = filter_posts(&feed, "CA");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "1");
/// ```
#[must_use]
pub fn filter_posts(posts: &[Post], query: &str) -> Vec<Post> {
    let query_lower = query.to_lowercase();
    posts
        .iter()
        .filter(|post| post.matches_lowercase(&query_lower))
        .cloned()
        .collect()
}

/// A filter computation waiting for its debounce window to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledFilter {
    pub ticket: u64,
    pub query: String,
}

/// Search input, settled query, and the derived filtered view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchEngine {
    /// Raw input as typed, echoed to the presentation layer immediately.
    pub raw_query: String,

    /// Most recently settled query that has been applied to the feed.
    pub settled_query: Option<String>,

    /// Settled query waiting for the feed to finish loading.
    pub pending_query: Option<String>,

    /// The one filter currently waiting on its debounce timer.
    pub scheduled: Option<ScheduledFilter>,

    /// Posts of the current snapshot matching the settled query.
    pub filtered: Vec<Post>,

    last_ticket: u64,
}

/// What the caller must do after [`SearchEngine::set_query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Arm the debounce timer for this ticket, replacing any previous one.
    Schedule(u64),
    /// The query resolved immediately; any armed timer must be cancelled.
    Resolved,
}

impl SearchEngine {
    /// Records raw input and schedules (or resolves) filtering.
    ///
    /// The empty query needs no debounce and resolves on the spot.
    pub fn set_query(&mut self, text: &str, feed: Option<&[Post]>) -> QueryOutcome {
        self.raw_query = text.to_string();

        if text.is_empty() {
            self.scheduled = None;
            self.settle(String::new(), feed);
            return QueryOutcome::Resolved;
        }

        self.last_ticket += 1;
        self.scheduled = Some(ScheduledFilter {
            ticket: self.last_ticket,
            query: text.to_string(),
        });
        QueryOutcome::Schedule(self.last_ticket)
    }

    /// Applies the scheduled filter if `ticket` is still current.
    ///
    /// Returns `false` for a stale or cancelled ticket, leaving state untouched.
    pub fn settle_due(&mut self, ticket: u64, feed: Option<&[Post]>) -> bool {
        match self.scheduled.take() {
            Some(scheduled) if scheduled.ticket == ticket => {
                self.settle(scheduled.query, feed);
                true
            }
            other => {
                self.scheduled = other;
                false
            }
        }
    }

    /// Drops the scheduled filter, if any. Returns whether one was dropped.
    pub fn cancel(&mut self) -> bool {
        self.scheduled.take().is_some()
    }

    /// Recomputes the filtered view against a new snapshot.
    ///
    /// A parked query is applied first and its marker cleared; otherwise the
    /// last settled query is re-applied so the view tracks the new snapshot.
    pub fn refilter(&mut self, feed: &[Post]) {
        if let Some(query) = self.pending_query.take() {
            tracing::debug!(query = %query, "replaying query parked before feed load");
            self.settled_query = Some(query);
        }

        let query = self.settled_query.as_deref().unwrap_or("");
        self.filtered = filter_posts(feed, query);
    }

    fn settle(&mut self, query: String, feed: Option<&[Post]>) {
        match feed {
            Some(posts) => {
                self.filtered = filter_posts(posts, &query);
                self.pending_query = None;
                self.settled_query = Some(query);
                tracing::debug!(
                    filtered_count = self.filtered.len(),
                    "search filter applied"
                );
            }
            None => {
                tracing::debug!(query = %query, "feed not loaded, parking query");
                self.filtered.clear();
                self.pending_query = Some(query);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> Vec<Post> {
        vec![
            Post::new("1", "Alice", "a cat", "u1"),
            Post::new("2", "Bob", "a dog", "u2"),
            Post::new("3", "Carla", "Cathedral at dusk", "u3"),
        ]
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn filter_matches_author_or_prompt() {
        assert_eq!(ids(&filter_posts(&feed(), "ca")), ["1", "3"]);
        assert_eq!(ids(&filter_posts(&feed(), "BOB")), ["2"]);
        assert_eq!(ids(&filter_posts(&feed(), "")), ["1", "2", "3"]);
        assert!(filter_posts(&feed(), "zebra").is_empty());
    }

    #[test]
    fn filter_agrees_with_reference_predicate() {
        let posts = feed();
        for query in ["", "a", "A", "at", "dusk", "ali", "o", "x", " "] {
            let expected: Vec<&str> = posts
                .iter()
                .filter(|p| {
                    let q = query.to_lowercase();
                    p.author_name.to_lowercase().contains(&q) || p.prompt.to_lowercase().contains(&q)
                })
                .map(|p| p.id.as_str())
                .collect();
            assert_eq!(ids(&filter_posts(&posts, query)), expected, "query {query:?}");
        }
    }

    #[test]
    fn only_latest_ticket_settles() {
        let posts = feed();
        let mut search = SearchEngine::default();

        let QueryOutcome::Schedule(first) = search.set_query("c", Some(&posts)) else {
            panic!("expected schedule");
        };
        let QueryOutcome::Schedule(second) = search.set_query("ca", Some(&posts)) else {
            panic!("expected schedule");
        };
        assert_eq!(search.raw_query, "ca");
        assert!(search.filtered.is_empty());

        assert!(!search.settle_due(first, Some(&posts)));
        assert!(search.settled_query.is_none());

        assert!(search.settle_due(second, Some(&posts)));
        assert_eq!(search.settled_query.as_deref(), Some("ca"));
        assert_eq!(ids(&search.filtered), ["1", "3"]);
        assert!(search.scheduled.is_none());
    }

    #[test]
    fn empty_query_resolves_immediately() {
        let posts = feed();
        let mut search = SearchEngine::default();
        search.set_query("dog", Some(&posts));

        assert_eq!(search.set_query("", Some(&posts)), QueryOutcome::Resolved);
        assert!(search.scheduled.is_none());
        assert_eq!(ids(&search.filtered), ["1", "2", "3"]);
    }

    #[test]
    fn query_before_load_is_parked_then_replayed() {
        let mut search = SearchEngine::default();
        let QueryOutcome::Schedule(ticket) = search.set_query("dog", None) else {
            panic!("expected schedule");
        };

        assert!(search.settle_due(ticket, None));
        assert!(search.filtered.is_empty());
        assert_eq!(search.pending_query.as_deref(), Some("dog"));

        search.refilter(&feed());
        assert_eq!(ids(&search.filtered), ["2"]);
        assert!(search.pending_query.is_none());
        assert_eq!(search.settled_query.as_deref(), Some("dog"));
    }

    #[test]
    fn refilter_reapplies_settled_query_to_new_snapshot() {
        let mut search = SearchEngine::default();
        let posts = feed();
        let QueryOutcome::Schedule(ticket) = search.set_query("a", Some(&posts)) else {
            panic!("expected schedule");
        };
        search.settle_due(ticket, Some(&posts));

        let newer = vec![Post::new("9", "Zed", "a bat", "u9")];
        search.refilter(&newer);
        assert_eq!(ids(&search.filtered), ["9"]);
    }

    #[test]
    fn cancel_prevents_settling() {
        let posts = feed();
        let mut search = SearchEngine::default();
        let QueryOutcome::Schedule(ticket) = search.set_query("dog", Some(&posts)) else {
            panic!("expected schedule");
        };
        assert!(search.cancel());
        assert!(!search.settle_due(ticket, Some(&posts)));
        assert!(search.settled_query.is_none());
    }
}
