//! Slow-burn population ramp running beside the render loop.

use std::sync::mpsc::{self, Receiver, Sender, TryIter};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

/// Longest single sleep between checks of the running flag.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Background thread that schedules point batches.
///
/// Step `i` (1-based) requests `i` points, with `delay` between steps. The
/// thread only sends batch sizes; the render loop owns the point collection and
/// appends them between frames, so it stays the single writer.
#[derive(Debug)]
pub struct Seeder {
    /// Batch sizes waiting to be applied by the render loop.
    receiver: Receiver<usize>,
    /// Flag to signal thread termination.
    running: Arc<RwLock<bool>>,
}

impl Seeder {
    /// Start the ramp thread.
    pub fn start(steps: usize, delay: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let running = Arc::new(RwLock::new(true));

        let flag = running.clone();
        thread::spawn(move || ramp(steps, delay, &sender, &flag));

        Self { receiver, running }
    }

    /// Batches sent since the last call, without blocking.
    pub fn pending(&self) -> TryIter<'_, usize> {
        self.receiver.try_iter()
    }

    /// Stop the ramp thread.
    pub fn stop(&self) {
        if let Ok(mut running) = self.running.write() {
            *running = false;
        }
    }
}

impl Drop for Seeder {
    fn drop(&mut self) {
        self.stop();
    }
}

fn ramp(steps: usize, delay: Duration, sender: &Sender<usize>, running: &Arc<RwLock<bool>>) {
    for step in 1..=steps {
        if !is_running(running) {
            return;
        }
        if sender.send(step).is_err() {
            // receiver dropped with the stage
            return;
        }
        tracing::info!(step, of = steps, "seed batch scheduled");

        if !sleep_while_running(delay, running) {
            return;
        }
    }
    tracing::debug!("seed ramp finished");
}

fn is_running(running: &Arc<RwLock<bool>>) -> bool {
    running.read().map(|flag| *flag).unwrap_or(false)
}

/// Sleep for `delay` in short slices. Returns `false` once stopped.
fn sleep_while_running(delay: Duration, running: &Arc<RwLock<bool>>) -> bool {
    let deadline = Instant::now() + delay;
    loop {
        if !is_running(running) {
            return false;
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return true;
        }
        thread::sleep(remaining.min(SLEEP_SLICE));
    }
}
