//! Process-wide registry of per-session customer views.
//!
//! Views live in a sharded concurrent map; a lock only covers the shard of
//! one view and only for in-memory updates. Callers perform backend I/O
//! between `begin_fetch` and `complete_fetch` without holding it. Views not
//! touched for the idle timeout are dropped by [`ViewStore::evict_idle`].

use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::customer::Customer;
use crate::domain::filter::FetchMode;
use crate::domain::view::{CustomerView, FetchTicket};

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

struct ViewEntry {
    view: CustomerView,
    last_seen: Instant,
}

pub struct ViewStore {
    views: DashMap<Uuid, ViewEntry>,
    idle_timeout: Duration,
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            views: DashMap::new(),
            idle_timeout,
        }
    }

    /// Runs `f` against the view of `key`, creating an empty view if needed.
    pub fn with_view<T>(&self, key: Uuid, f: impl FnOnce(&mut CustomerView) -> T) -> T {
        let mut entry = self.views.entry(key).or_insert_with(|| ViewEntry {
            view: CustomerView::new(),
            last_seen: Instant::now(),
        });
        entry.last_seen = Instant::now();
        f(&mut entry.view)
    }

    /// Returns a copy of the view for rendering. Unknown keys get an empty
    /// view without being registered.
    pub fn snapshot(&self, key: Uuid) -> CustomerView {
        match self.views.get_mut(&key) {
            Some(mut entry) => {
                entry.last_seen = Instant::now();
                entry.view.clone()
            }
            None => CustomerView::new(),
        }
    }

    pub fn begin_fetch(&self, key: Uuid, mode: FetchMode) -> FetchTicket {
        self.with_view(key, |view| view.begin_fetch(mode))
    }

    pub fn complete_fetch(&self, key: Uuid, ticket: FetchTicket, customers: Vec<Customer>) -> bool {
        self.with_view(key, |view| view.complete_fetch(ticket, customers))
    }

    pub fn set_query(&self, key: Uuid, query: &str) {
        self.with_view(key, |view| view.set_query(query));
    }

    /// Drops the view when its session ends.
    pub fn remove(&self, key: Uuid) {
        self.views.remove(&key);
    }

    /// Removes views idle for longer than the timeout. Call this
    /// periodically from a background task.
    pub fn evict_idle(&self) -> usize {
        let before = self.views.len();
        self.views
            .retain(|_, entry| entry.last_seen.elapsed() <= self.idle_timeout);
        before.saturating_sub(self.views.len())
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::thread::sleep;

    use super::*;
    use crate::domain::filter::Segment;
    use crate::domain::search::tests::customer;

    #[test]
    fn views_are_isolated_per_session() {
        let store = ViewStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let ticket = store.begin_fetch(alice, FetchMode::Preset(Segment::Vip));
        store.complete_fetch(alice, ticket, vec![customer(1, "Amal", "", "")]);
        store.set_query(bob, "zzz");

        assert_eq!(store.snapshot(alice).base().len(), 1);
        assert_eq!(store.snapshot(alice).query(), "");
        assert!(store.snapshot(bob).base().is_empty());
        assert_eq!(store.snapshot(bob).query(), "zzz");
    }

    #[test]
    fn remove_forgets_the_view() {
        let store = ViewStore::new();
        let key = Uuid::new_v4();
        store.set_query(key, "amal");

        store.remove(key);

        assert_eq!(store.snapshot(key).query(), "");
        assert!(store.is_empty());
    }

    #[test]
    fn snapshot_does_not_register_unknown_keys() {
        let store = ViewStore::new();

        let view = store.snapshot(Uuid::new_v4());

        assert!(!view.is_loaded());
        assert!(store.is_empty());
    }

    #[test]
    fn idle_views_are_evicted() {
        let store = ViewStore::with_idle_timeout(Duration::from_millis(50));
        let idle = Uuid::new_v4();
        let active = Uuid::new_v4();
        for key in [idle, active] {
            let ticket = store.begin_fetch(key, FetchMode::default());
            store.complete_fetch(key, ticket, vec![customer(1, "Amal", "", "")]);
        }

        sleep(Duration::from_millis(120));
        store.set_query(active, "amal");
        let evicted = store.evict_idle();

        assert_eq!(evicted, 1);
        assert_eq!(store.len(), 1);
        assert!(!store.snapshot(idle).is_loaded());
        assert!(store.snapshot(active).is_loaded());
    }
}
