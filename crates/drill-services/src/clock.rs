//! Interruptible waits and the shutdown signal that interrupts them

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use drill_core::Clock;
use tracing::debug;

/// Raised once (e.g. from a Ctrl+C handler) to stop the session.
///
/// Triggering drops the sender, so every clock waiting on it wakes at once and
/// later waits return immediately.
pub struct Shutdown {
    flag: AtomicBool,
    trigger: Mutex<Option<Sender<()>>>,
    rx: Receiver<()>,
}

impl Shutdown {
    pub fn new() -> Arc<Self> {
        let (tx, rx) = bounded(1);
        Arc::new(Self {
            flag: AtomicBool::new(false),
            trigger: Mutex::new(Some(tx)),
            rx,
        })
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
        if let Ok(mut trigger) = self.trigger.lock() {
            trigger.take();
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Flag checked by the scheduler between steps
    pub fn flag(&self) -> &AtomicBool {
        &self.flag
    }

    pub fn clock(&self) -> SleepClock {
        SleepClock { wake: self.rx.clone() }
    }
}

/// Sleeps on the shutdown channel so a shutdown cuts the wait short
#[derive(Clone)]
pub struct SleepClock {
    wake: Receiver<()>,
}

impl Clock for SleepClock {
    fn pause(&mut self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        match self.wake.recv_timeout(duration) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                debug!(?duration, "Wait interrupted by shutdown");
            }
        }
    }
}
