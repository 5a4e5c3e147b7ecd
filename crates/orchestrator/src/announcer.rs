//! Loading status announcer.
//!
//! While a generation is in flight the announcer publishes one status line
//! at a time on a [`watch`] channel, advancing every interval and wrapping
//! after the last line. [`LoadingAnnouncer::start`] returns a guard; the
//! cycle runs exactly as long as the guard lives.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::debug;

use crate::config::{DEFAULT_LOADING_INTERVAL, DEFAULT_LOADING_MESSAGES};

/// Cycles status lines while a generation is in flight.
#[derive(Debug)]
pub struct LoadingAnnouncer {
    messages: Arc<[String]>,
    interval: Duration,
    status: Arc<watch::Sender<String>>,
}

impl LoadingAnnouncer {
    /// Create an announcer. An empty message list or a zero interval falls
    /// back to the defaults.
    pub fn new(messages: Vec<String>, interval: Duration) -> Self {
        let messages: Arc<[String]> = if messages.is_empty() {
            DEFAULT_LOADING_MESSAGES.iter().map(|s| s.to_string()).collect()
        } else {
            messages.into()
        };
        let interval = if interval.is_zero() {
            DEFAULT_LOADING_INTERVAL
        } else {
            interval
        };
        let (status, _) = watch::channel(messages[0].clone());

        Self {
            messages,
            interval,
            status: Arc::new(status),
        }
    }

    /// The status lines, in announcement order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The line currently shown.
    pub fn current(&self) -> String {
        self.status.borrow().clone()
    }

    /// Follow status changes.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.status.subscribe()
    }

    /// Start cycling from the first line.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> AnnouncerGuard {
        self.status.send_replace(self.messages[0].clone());

        let active = Arc::new(AtomicBool::new(true));
        let messages = Arc::clone(&self.messages);
        let status = Arc::clone(&self.status);
        let period = self.interval;
        let task_active = Arc::clone(&active);

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            let mut index = 0;
            loop {
                ticker.tick().await;
                index = (index + 1) % messages.len();
                let next = &messages[index];
                // Checked under the channel lock so nothing lands after the guard resets.
                status.send_if_modified(|current| {
                    if !task_active.load(Ordering::SeqCst) {
                        return false;
                    }
                    current.clone_from(next);
                    true
                });
            }
        });

        debug!("Loading announcer started ({} lines)", self.messages.len());

        AnnouncerGuard {
            handle,
            active,
            status: Arc::clone(&self.status),
            first: self.messages[0].clone(),
        }
    }
}

/// Keeps the announcer cycling. Dropping it stops the cycle and resets
/// the status to the first line.
#[derive(Debug)]
pub struct AnnouncerGuard {
    handle: JoinHandle<()>,
    active: Arc<AtomicBool>,
    status: Arc<watch::Sender<String>>,
    first: String,
}

impl Drop for AnnouncerGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        self.handle.abort();
        self.status.send_replace(self.first.clone());
        debug!("Loading announcer stopped");
    }
}
