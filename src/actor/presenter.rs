//! Presenter Actor: Dedicated thread that owns terminal output.
//!
//! It receives whole frames from the stage loop, diffs each against the
//! frame on screen and flushes the result in a single write.

use super::messages::PresentCommand;
use crate::canvas::{render_diff, render_full, Canvas, DiffState};
use crate::error::StageError;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Presenter actor that handles terminal output.
pub struct PresenterActor {
    /// Handle to the presenter thread.
    handle: Option<JoinHandle<PresentStats>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

/// Presentation statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentStats {
    /// Frames written.
    pub frames: u64,
    /// Cells changed across all frames.
    pub cells_changed: u64,
    /// Bytes written to the terminal.
    pub bytes_written: u64,
    /// Smoothed time per frame, in microseconds.
    pub avg_present_us: u64,
}

struct Presenter<W> {
    /// Frame currently on screen.
    current: Option<Canvas>,
    diff_state: DiffState,
    /// Reused output buffer.
    output: Vec<u8>,
    sink: W,
    stats: PresentStats,
}

impl<W: Write> Presenter<W> {
    fn new(sink: W) -> Self {
        Self {
            current: None,
            diff_state: DiffState::new(),
            output: Vec::with_capacity(64 * 1024),
            sink,
            stats: PresentStats::default(),
        }
    }

    fn present(&mut self, next: Canvas, full: bool) -> io::Result<()> {
        let start = Instant::now();
        self.output.clear();

        let diff = match self.current.as_ref() {
            Some(current) if !full => {
                render_diff(current, &next, &mut self.output, &mut self.diff_state)?
            }
            _ => render_full(&next, &mut self.output, &mut self.diff_state)?,
        };

        if !self.output.is_empty() {
            self.sink.write_all(&self.output)?;
            self.sink.flush()?;
        }
        self.current = Some(next);

        let elapsed = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.stats.frames += 1;
        self.stats.cells_changed += diff.cells_changed as u64;
        self.stats.bytes_written += self.output.len() as u64;
        self.stats.avg_present_us = if self.stats.avg_present_us == 0 {
            elapsed
        } else {
            (self.stats.avg_present_us * 15 + elapsed) / 16
        };
        trace!(cells = diff.cells_changed, bytes = self.output.len(), "frame presented");
        Ok(())
    }
}

impl PresenterActor {
    /// Spawn the presenter writing to stdout.
    pub fn spawn(receiver: Receiver<PresentCommand>) -> Result<Self, StageError> {
        Self::spawn_with(receiver, io::stdout())
    }

    /// Spawn the presenter writing to any sink.
    pub fn spawn_with<W>(receiver: Receiver<PresentCommand>, sink: W) -> Result<Self, StageError>
    where
        W: Write + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("luna-present".to_string())
            .spawn(move || {
                let mut presenter = Presenter::new(sink);
                if let Err(e) = Self::run_loop(&receiver, &shutdown_clone, &mut presenter) {
                    warn!(error = %e, "presenter stopped on write error");
                }
                presenter.stats
            })
            .map_err(|source| StageError::Spawn {
                name: "luna-present",
                source,
            })?;

        debug!("presenter started");
        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the presenter thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the presenter thread to finish and return its statistics.
    pub fn join(mut self) -> PresentStats {
        self.shutdown();
        let stats = self
            .handle
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();
        debug!(frames = stats.frames, bytes = stats.bytes_written, "presenter stopped");
        stats
    }

    fn run_loop<W: Write>(
        receiver: &Receiver<PresentCommand>,
        shutdown: &Arc<AtomicBool>,
        presenter: &mut Presenter<W>,
    ) -> io::Result<()> {
        // Queued frames are written before the shutdown flag is honored
        loop {
            match receiver.recv_timeout(Duration::from_millis(16)) {
                Ok(PresentCommand::Frame(canvas)) => presenter.present(*canvas, false)?,
                Ok(PresentCommand::FullRedraw(canvas)) => presenter.present(*canvas, true)?,
                Ok(PresentCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    if shutdown.load(Ordering::Relaxed) {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

impl Drop for PresenterActor {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
