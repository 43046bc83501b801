//! Fixed-interval tick timer
//!
//! A dedicated thread sends ticks over a bounded channel; the simulation
//! drains them serially on whichever thread owns the device. The channel
//! holds at most one pending tick — if the consumer is still busy when the
//! next interval elapses, that tick is dropped rather than queued, so a
//! missed deadline delays the cadence instead of building a frame backlog.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Handle to a running timer thread.
pub struct TickTimer {
    ticks: Receiver<()>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TickTimer {
    /// Spawns the timer thread ticking every `interval`.
    pub fn start(interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, rx): (SyncSender<()>, Receiver<()>) = mpsc::sync_channel(1);

        let thread_stop = Arc::clone(&stop);
        let handle = std::thread::Builder::new()
            .name("life-tick-timer".into())
            .spawn(move || {
                while !thread_stop.load(Ordering::Relaxed) {
                    std::thread::sleep(interval);
                    if thread_stop.load(Ordering::Relaxed) {
                        break;
                    }
                    if tx.try_send(()).is_err() {
                        // Consumer still mid-tick; drop this one.
                        log::warn!("tick dropped: previous tick still draining");
                    }
                }
            })
            .expect("failed to spawn timer thread");

        Self {
            ticks: rx,
            stop,
            handle: Some(handle),
        }
    }

    /// Takes one pending tick if the interval has elapsed.
    pub fn try_tick(&self) -> bool {
        match self.ticks.try_recv() {
            Ok(()) => true,
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => false,
        }
    }

    /// Stops the timer thread and waits for it to exit.
    ///
    /// After this returns no further tick can be delivered, so teardown of
    /// device resources cannot race a pending tick.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
