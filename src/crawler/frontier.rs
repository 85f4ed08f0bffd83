//! The crawl frontier: pending work, visited set, and completion detection
//!
//! The queue of URLs to fetch, the set of URLs ever admitted, and the
//! outstanding-work counter all live behind one mutex. This is the only
//! shared mutable state in the whole crawl, and keeping it under a single
//! lock is what makes `try_admit` genuinely atomic: two workers can never
//! both observe a URL as new and both enqueue it.
//!
//! Termination is detected with the outstanding-work counter rather than
//! "queue is empty right now". A momentarily empty queue means nothing while
//! another worker is mid-extraction and about to enqueue more; only an empty
//! queue with zero outstanding items is global completion, and that is when
//! every blocked worker is released with `None`.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use tokio::sync::Notify;
use url::Url;

#[derive(Debug)]
struct FrontierState {
    /// URLs admitted but not yet dequeued
    queue: VecDeque<Url>,

    /// Every URL ever admitted (not merely fetched)
    visited: HashSet<String>,

    /// Admitted-but-not-fully-processed count; zero together with an empty
    /// queue means global completion
    outstanding: usize,

    /// Set on operator abort; no further admissions once closed
    closed: bool,
}

/// Concurrency-safe, dedup-guaranteed work queue of URLs to visit
#[derive(Debug)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    wakeup: Notify,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FrontierState {
                queue: VecDeque::new(),
                visited: HashSet::new(),
                outstanding: 0,
                closed: false,
            }),
            wakeup: Notify::new(),
        }
    }

    /// Atomically admits a URL: if it was never admitted before, it is marked
    /// visited and enqueued in one step
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to admit
    ///
    /// # Returns
    ///
    /// * `true` - This call admitted the URL; it will be dequeued exactly once
    /// * `false` - The URL was already admitted earlier, or the frontier is
    ///   closed
    pub fn try_admit(&self, url: &Url) -> bool {
        let mut state = self.state.lock().expect("frontier lock poisoned");

        if state.closed {
            return false;
        }

        if !state.visited.insert(url.as_str().to_string()) {
            return false;
        }

        state.queue.push_back(url.clone());
        state.outstanding += 1;
        drop(state);

        self.wakeup.notify_one();
        true
    }

    /// Waits for the next URL to process
    ///
    /// Blocks while the queue is empty but work is still outstanding, since a
    /// busy worker may be about to enqueue more. Returns `None` only on
    /// global completion (empty queue, zero outstanding), at which point all
    /// other waiters are released too.
    pub async fn next(&self) -> Option<Url> {
        loop {
            // Register for wakeups before checking state, so a notification
            // arriving between the check and the await is not lost.
            let waiter = self.wakeup.notified();
            tokio::pin!(waiter);
            waiter.as_mut().enable();

            {
                let mut state = self.state.lock().expect("frontier lock poisoned");

                if let Some(url) = state.queue.pop_front() {
                    return Some(url);
                }

                if state.outstanding == 0 {
                    drop(state);
                    // Release every other blocked worker as well.
                    self.wakeup.notify_waiters();
                    return None;
                }
            }

            waiter.await;
        }
    }

    /// Marks one dequeued URL as fully processed (fetch, persist, and
    /// extraction all finished)
    ///
    /// Must be called exactly once per URL returned by [`next`](Self::next),
    /// on every path including failures, or the crawl will never terminate.
    pub fn complete(&self) {
        let mut state = self.state.lock().expect("frontier lock poisoned");
        debug_assert!(state.outstanding > 0, "complete() without matching next()");

        state.outstanding = state.outstanding.saturating_sub(1);
        let done = state.outstanding == 0 && state.queue.is_empty();
        drop(state);

        if done {
            self.wakeup.notify_waiters();
        }
    }

    /// Closes the frontier on operator abort
    ///
    /// Admission stops, queued-but-unstarted entries are dropped, and
    /// in-flight work is left to drain; workers exit once their current URL
    /// completes.
    pub fn close(&self) {
        let mut state = self.state.lock().expect("frontier lock poisoned");
        state.closed = true;

        let dropped = state.queue.len();
        state.outstanding -= dropped;
        state.queue.clear();
        drop(state);

        if dropped > 0 {
            tracing::warn!(dropped, "frontier closed, pending entries discarded");
        }
        self.wakeup.notify_waiters();
    }

    /// Number of URLs currently waiting in the queue
    pub fn queued(&self) -> usize {
        self.state.lock().expect("frontier lock poisoned").queue.len()
    }

    /// Number of URLs ever admitted
    pub fn visited_count(&self) -> usize {
        self.state
            .lock()
            .expect("frontier lock poisoned")
            .visited
            .len()
    }

    /// Current outstanding-work count
    pub fn outstanding(&self) -> usize {
        self.state.lock().expect("frontier lock poisoned").outstanding
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_admit_once() {
        let frontier = Frontier::new();
        let u = url("https://example.test/a");

        assert!(frontier.try_admit(&u));
        assert!(!frontier.try_admit(&u));
        assert_eq!(frontier.queued(), 1);
        assert_eq!(frontier.visited_count(), 1);
        assert_eq!(frontier.outstanding(), 1);
    }

    #[tokio::test]
    async fn test_next_returns_admitted_url() {
        let frontier = Frontier::new();
        let u = url("https://example.test/a");
        frontier.try_admit(&u);

        assert_eq!(frontier.next().await, Some(u));
        // Dequeued but not yet completed
        assert_eq!(frontier.outstanding(), 1);
    }

    #[tokio::test]
    async fn test_next_is_none_after_completion() {
        let frontier = Frontier::new();
        frontier.try_admit(&url("https://example.test/a"));

        let got = frontier.next().await.unwrap();
        assert_eq!(got.as_str(), "https://example.test/a");
        frontier.complete();

        assert_eq!(frontier.next().await, None);
    }

    #[tokio::test]
    async fn test_next_is_none_on_fresh_frontier() {
        let frontier = Frontier::new();
        assert_eq!(frontier.next().await, None);
    }

    #[tokio::test]
    async fn test_concurrent_admission_is_at_most_once() {
        let frontier = Arc::new(Frontier::new());

        let mut handles = Vec::new();
        for _ in 0..2 {
            let frontier = Arc::clone(&frontier);
            handles.push(tokio::spawn(async move {
                frontier.try_admit(&url("https://example.test/a"))
            }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 1);
        assert_eq!(frontier.queued(), 1);
    }

    #[tokio::test]
    async fn test_worker_blocks_while_peer_is_mid_processing() {
        let frontier = Arc::new(Frontier::new());
        frontier.try_admit(&url("https://example.test/a"));

        // Worker one takes the only queued item.
        let first = frontier.next().await.unwrap();
        assert_eq!(first.as_str(), "https://example.test/a");

        // Worker two must block: the queue is empty but work is outstanding.
        let waiter = {
            let frontier = Arc::clone(&frontier);
            tokio::spawn(async move { frontier.next().await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        // Worker one discovers a link, then finishes its own item.
        frontier.try_admit(&url("https://example.test/b"));
        frontier.complete();

        let second = timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
        assert_eq!(second.unwrap().as_str(), "https://example.test/b");
    }

    #[tokio::test]
    async fn test_all_waiters_released_on_completion() {
        let frontier = Arc::new(Frontier::new());
        frontier.try_admit(&url("https://example.test/a"));
        let item = frontier.next().await.unwrap();
        assert_eq!(item.as_str(), "https://example.test/a");

        let mut waiters = Vec::new();
        for _ in 0..3 {
            let frontier = Arc::clone(&frontier);
            waiters.push(tokio::spawn(async move { frontier.next().await }));
        }
        tokio::time::sleep(Duration::from_millis(50)).await;

        frontier.complete();

        for waiter in waiters {
            let result = timeout(Duration::from_secs(1), waiter)
                .await
                .expect("waiter should observe completion")
                .unwrap();
            assert_eq!(result, None);
        }
    }

    #[tokio::test]
    async fn test_close_stops_admission_and_drains() {
        let frontier = Frontier::new();
        frontier.try_admit(&url("https://example.test/a"));
        frontier.try_admit(&url("https://example.test/b"));

        // One item in flight, one still queued.
        let in_flight = frontier.next().await.unwrap();
        assert_eq!(in_flight.as_str(), "https://example.test/a");

        frontier.close();

        assert!(!frontier.try_admit(&url("https://example.test/c")));
        assert_eq!(frontier.queued(), 0);
        assert_eq!(frontier.outstanding(), 1);

        // The in-flight item drains normally, then the crawl is over.
        frontier.complete();
        assert_eq!(frontier.next().await, None);
    }
}
