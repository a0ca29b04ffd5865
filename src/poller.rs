use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::FetchError;

const SLEEP_SLICE: Duration = Duration::from_millis(200);

/// One completed fetch from a poller worker. Generations increase by one per
/// fetch, so a caller juggling several sources can drop any result that
/// arrives behind a newer one (last write wins).
#[derive(Debug)]
pub struct PollUpdate<T> {
    pub generation: u64,
    pub result: Result<T, FetchError>,
}

/// Owning lifecycle of a timer-driven fetch worker. Dropping the handle stops
/// the worker; an in-flight request is never interrupted, only its successor
/// schedule.
pub struct PollHandle {
    stop: Arc<AtomicBool>,
    kick: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

/// Spawns a worker that runs `fetch` immediately, then once per `interval`,
/// delivering every outcome (success or error) on the returned channel.
pub fn spawn_poller<T, F>(interval: Duration, mut fetch: F) -> (PollHandle, Receiver<PollUpdate<T>>)
where
    T: Send + 'static,
    F: FnMut() -> Result<T, FetchError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let stop = Arc::new(AtomicBool::new(false));
    let kick = Arc::new(AtomicBool::new(false));

    let worker_stop = Arc::clone(&stop);
    let worker_kick = Arc::clone(&kick);
    let worker = thread::spawn(move || {
        let mut generation = 0u64;
        loop {
            if worker_stop.load(Ordering::Relaxed) {
                return;
            }
            generation += 1;
            let update = PollUpdate {
                generation,
                result: fetch(),
            };
            if tx.send(update).is_err() {
                // Receiver gone; nothing is listening anymore.
                return;
            }
            if !sleep_until_due(interval, &worker_stop, &worker_kick) {
                return;
            }
        }
    });

    (
        PollHandle {
            stop,
            kick,
            worker: Some(worker),
        },
        rx,
    )
}

impl PollHandle {
    /// Requests a fetch now instead of waiting out the rest of the interval.
    pub fn kick(&self) {
        self.kick.store(true, Ordering::Relaxed);
    }

    /// Stops the worker and waits for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Sleeps out the interval in short slices so stop and kick stay responsive.
/// Returns false when the poller should shut down instead of fetching again.
fn sleep_until_due(interval: Duration, stop: &AtomicBool, kick: &AtomicBool) -> bool {
    let started = Instant::now();
    while started.elapsed() < interval {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        if kick.swap(false, Ordering::Relaxed) {
            return true;
        }
        thread::sleep(SLEEP_SLICE.min(interval));
    }
    true
}
