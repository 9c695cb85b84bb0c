//! Feed Store: the cached post collection.
//!
//! The store exclusively owns the [`FeedStore::snapshot`]. It is `None` until
//! the first successful load, after which it holds the server collection in
//! newest-first order. A failed load never touches the snapshot.

use crate::domain::Post;

/// Cached feed plus load bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedStore {
    /// Posts newest-first, or `None` before the first successful load.
    pub snapshot: Option<Vec<Post>>,

    /// Number of loads issued but not yet completed.
    pub loads_in_flight: usize,

    /// Message from the most recent failed load, cleared on success.
    pub last_error: Option<String>,
}

impl FeedStore {
    /// Returns `true` once a load has succeeded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Returns `true` while any load is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loads_in_flight > 0
    }

    /// Posts in display order; empty before the first load.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        self.snapshot.as_deref().unwrap_or(&[])
    }

    /// Records that a load was issued.
    pub fn begin_load(&mut self) {
        self.loads_in_flight += 1;
    }

    /// Replaces the snapshot with the server collection, reversed.
    ///
    /// Loads are not coalesced: whichever response arrives last wins.
    pub fn apply_loaded(&mut self, mut server_order: Vec<Post>) {
        server_order.reverse();
        self.snapshot = Some(server_order);
        self.last_error = None;
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
    }

    /// Records a failed load, keeping the previous snapshot.
    pub fn apply_failed(&mut self, message: String) {
        self.last_error = Some(message);
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
    }
}
