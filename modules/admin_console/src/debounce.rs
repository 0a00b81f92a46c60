//! Cancellable quiescence timer.
//!
//! Every call to [`Debouncer::reschedule`] cancels the pending emission and
//! starts a fresh window. A value is delivered on the receiver only if no other
//! value arrived during its window, and never after the debouncer is dropped.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Default)]
struct Slot {
    generation: u64,
    cancel: Option<CancellationToken>,
}

pub struct Debouncer<T> {
    window: Duration,
    tx: mpsc::UnboundedSender<T>,
    slot: Arc<Mutex<Slot>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Must be driven from within a tokio runtime.
    pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                window,
                tx,
                slot: Arc::new(Mutex::new(Slot::default())),
            },
            rx,
        )
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Cancel whatever is pending and restart the window with `value`.
    pub fn reschedule(&self, value: T) {
        let token = CancellationToken::new();
        let generation = {
            let mut slot = self.slot.lock();
            if let Some(prev) = slot.cancel.replace(token.clone()) {
                prev.cancel();
            }
            slot.generation += 1;
            slot.generation
        };

        let tx = self.tx.clone();
        let slot = Arc::clone(&self.slot);
        let window = self.window;
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(window) => {
                    // Holding the lock while sending keeps a concurrent
                    // reschedule from slipping in between check and send.
                    let mut slot = slot.lock();
                    if slot.generation == generation {
                        slot.cancel = None;
                        let _ = tx.send(value);
                    }
                }
            }
        });
    }

    /// Drop the pending emission, if any.
    pub fn cancel(&self) {
        let mut slot = self.slot.lock();
        slot.generation += 1;
        if let Some(token) = slot.cancel.take() {
            token.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot.lock().cancel.is_some()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let mut slot = self.slot.lock();
        slot.generation += 1;
        if let Some(token) = slot.cancel.take() {
            token.cancel();
        }
    }
}
