//! Cancellable quiet-period timer for search input.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

/// Default pause after the last keystroke before a search runs.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Every call to [`Debouncer::arm`] supersedes the previous one; only the
/// last armed timer that survives its whole quiet period fires.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    sequence: watch::Sender<u64>,
}

/// One armed timer. Await [`Armed::settled`] to learn whether it fired.
#[derive(Debug)]
pub struct Armed {
    ticket: u64,
    deadline: Instant,
    sequence: watch::Receiver<u64>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        let (sequence, _) = watch::channel(0);
        Self { quiet, sequence }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Starts a new timer, cancelling any pending one.
    pub fn arm(&self) -> Armed {
        let mut ticket = 0;
        self.sequence.send_modify(|seq| {
            *seq += 1;
            ticket = *seq;
        });
        Armed {
            ticket,
            deadline: Instant::now() + self.quiet,
            sequence: self.sequence.subscribe(),
        }
    }

    /// Cancels the pending timer without arming a new one.
    pub fn cancel(&self) {
        self.sequence.send_modify(|seq| *seq += 1);
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl Armed {
    /// Waits out the quiet period.
    ///
    /// Returns `true` when no newer timer was armed (and nothing was
    /// cancelled) in the meantime, `false` as soon as it is superseded.
    pub async fn settled(mut self) -> bool {
        loop {
            if *self.sequence.borrow_and_update() != self.ticket {
                return false;
            }
            tokio::select! {
                _ = sleep_until(self.deadline) => {
                    return *self.sequence.borrow() == self.ticket;
                }
                changed = self.sequence.changed() => {
                    if changed.is_err() {
                        return false;
                    }
                }
            }
        }
    }
}
