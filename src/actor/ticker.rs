//! Ticker Actor: frame pacing for the stage loop.
//!
//! Reveal transitions and the typing indicator animate on these ticks; the
//! stage repaints at most once per tick.

use crate::error::StageError;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

const THREAD_NAME: &str = "luna-ticker";

/// Longest single sleep, so shutdown is noticed promptly.
const MAX_NAP: Duration = Duration::from_millis(1);

/// One animation frame.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Frame number, counting emitted and skipped frames alike.
    pub frame: u64,
    /// When the frame was emitted.
    pub at: Instant,
}

/// Fixed-rate schedule that drops frames instead of bursting after a stall.
#[derive(Debug, Clone, Copy)]
struct Pacer {
    interval: Duration,
    due: Instant,
    frame: u64,
}

impl Pacer {
    fn new(start: Instant, interval: Duration) -> Self {
        Self {
            interval,
            due: start + interval,
            frame: 0,
        }
    }

    /// The frame due at `now`, or how long to wait for it.
    fn poll(&mut self, now: Instant) -> Result<Tick, Duration> {
        if now < self.due {
            return Err(self.due - now);
        }
        let tick = Tick { frame: self.frame, at: now };
        self.frame += 1;
        self.due += self.interval;
        if self.due < now {
            self.due = now + self.interval;
        }
        Ok(tick)
    }
}

/// Emits [`Tick`]s on a dedicated thread.
pub struct TickerActor {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
    tick_rx: Receiver<Tick>,
}

impl TickerActor {
    /// Start ticking every `interval`.
    pub fn spawn(interval: Duration) -> Result<Self, StageError> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        let (tick_tx, tick_rx) = bounded(2);

        let handle = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || pace(&tick_tx, &flag, interval))
            .map_err(|source| StageError::Spawn {
                name: THREAD_NAME,
                source,
            })?;

        debug!(?interval, "ticker started");
        Ok(Self {
            handle: Some(handle),
            shutdown,
            tick_rx,
        })
    }

    /// Tick stream for `select!`.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// Ask the thread to stop after its current nap.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Stop and wait for the thread.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            debug!("ticker stopped");
        }
    }
}

impl Drop for TickerActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn pace(tick_tx: &Sender<Tick>, shutdown: &AtomicBool, interval: Duration) {
    let mut pacer = Pacer::new(Instant::now(), interval);
    while !shutdown.load(Ordering::Relaxed) {
        match pacer.poll(Instant::now()) {
            Ok(tick) => match tick_tx.try_send(tick) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => trace!(frame = tick.frame, "stage busy, frame dropped"),
                Err(TrySendError::Disconnected(_)) => break,
            },
            Err(wait) => thread::sleep(wait.min(MAX_NAP)),
        }
    }
}
