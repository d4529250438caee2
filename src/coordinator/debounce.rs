// file: src/coordinator/debounce.rs
// description: quiet-period debouncer for free-text search input
// reference: https://docs.rs/tokio/latest/tokio/time/fn.sleep.html

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::sleep;

/// Lets a value through only if nothing newer arrived during the quiet
/// period. Each `settle` call restarts the window for all earlier callers.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            generation: AtomicU64::new(0),
        }
    }

    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        sleep(self.quiet).await;
        (self.generation.load(Ordering::SeqCst) == ticket).then_some(value)
    }
}
