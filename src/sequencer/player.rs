//! Player Actor: dedicated thread that drives one scripted playback.
//!
//! The player owns the [`PlaybackState`], turns `Schedule` effects into
//! one-shot timers and sends a snapshot after every settled change. At most
//! one timer is pending; it is guarded by a child [`CancellationToken`] that
//! is cancelled on reset and, through its parent, on teardown.

use super::delay::{DelaySource, PlaybackTiming, RandomDelay};
use super::script::Script;
use super::state::{advance, Effect, PlaybackEvent, PlaybackState};
use super::PlaybackSnapshot;
use crate::error::StageError;
use crossbeam_channel::{self as channel, select, Receiver};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Commands accepted by the player thread.
#[derive(Debug, Clone, Copy)]
enum Command {
    Reset,
    Shutdown,
}

/// The timer for the turn currently being waited on.
struct PendingTimer {
    cursor: usize,
    fires: Receiver<Instant>,
    token: CancellationToken,
}

/// Player actor for one scripted conversation.
pub struct Player {
    /// Handle to the player thread.
    handle: Option<JoinHandle<()>>,
    /// Command channel into the thread.
    commands: channel::Sender<Command>,
    /// Settled states out of the thread.
    updates: Receiver<PlaybackSnapshot>,
    /// Cancelled on teardown; parent of every timer token.
    token: CancellationToken,
}

impl Player {
    /// Spawn a player with randomized agent delays.
    pub fn spawn(script: Script, timing: PlaybackTiming) -> Result<Self, StageError> {
        Self::spawn_with(script, timing, RandomDelay::new())
    }

    /// Spawn a player with a custom delay source.
    pub fn spawn_with<D>(script: Script, timing: PlaybackTiming, delays: D) -> Result<Self, StageError>
    where
        D: DelaySource + Send + 'static,
    {
        let (command_tx, command_rx) = channel::bounded(4);
        let (update_tx, update_rx) = channel::unbounded();
        let token = CancellationToken::new();
        let thread_token = token.clone();

        let handle = thread::Builder::new()
            .name("luna-player".to_string())
            .spawn(move || {
                let mut driver = Driver {
                    script,
                    timing,
                    delays,
                    state: PlaybackState::new(),
                    pending: None,
                    updates: update_tx,
                    token: thread_token,
                };
                driver.run(&command_rx);
            })
            .map_err(|source| StageError::Spawn {
                name: "luna-player",
                source,
            })?;

        debug!(turns = script.len(), "player started");
        Ok(Self {
            handle: Some(handle),
            commands: command_tx,
            updates: update_rx,
            token,
        })
    }

    /// Receiver of settled playback states.
    ///
    /// Use this with `select!` alongside input and tick channels.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<PlaybackSnapshot> {
        &self.updates
    }

    /// Restart playback from the first turn.
    ///
    /// Blocks only while the player is draining earlier commands.
    pub fn reset(&self) {
        if self.commands.send(Command::Reset).is_err() {
            warn!("player stopped, replay request dropped");
        }
    }

    /// Cancel the pending timer and ask the thread to stop.
    pub fn shutdown(&self) {
        self.token.cancel();
        let _ = self.commands.try_send(Command::Shutdown);
    }

    /// Stop and wait for the player thread to finish.
    pub fn join(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            debug!("player stopped");
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("running", &self.handle.is_some())
            .field("cancelled", &self.token.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// Thread-side state of the player.
struct Driver<D> {
    script: Script,
    timing: PlaybackTiming,
    delays: D,
    state: PlaybackState,
    pending: Option<PendingTimer>,
    updates: channel::Sender<PlaybackSnapshot>,
    token: CancellationToken,
}

impl<D: DelaySource> Driver<D> {
    fn run(&mut self, commands: &Receiver<Command>) {
        self.apply(PlaybackEvent::Evaluate);
        self.publish();

        loop {
            if self.token.is_cancelled() {
                break;
            }

            let timer = self
                .pending
                .as_ref()
                .map_or_else(channel::never, |p| p.fires.clone());

            select! {
                recv(commands) -> command => match command {
                    Ok(Command::Reset) => {
                        self.cancel_pending();
                        self.apply(PlaybackEvent::Reset);
                        self.publish();
                    }
                    Ok(Command::Shutdown) | Err(_) => break,
                },
                recv(timer) -> _ => {
                    let Some(pending) = self.pending.take() else {
                        continue;
                    };
                    if pending.token.is_cancelled() {
                        trace!(cursor = pending.cursor, "cancelled timer fired, dropped");
                        continue;
                    }
                    self.apply(PlaybackEvent::DelayElapsed { cursor: pending.cursor });
                    self.publish();
                }
            }
        }

        self.cancel_pending();
    }

    /// Apply an event and follow its effects until the driver has to wait.
    fn apply(&mut self, event: PlaybackEvent) {
        let mut event = Some(event);
        while let Some(current) = event.take() {
            let (next, effect) = advance(&self.state, self.script, current);
            self.state = next;
            debug!(?current, ?effect, cursor = self.state.cursor(), "playback transition");
            match effect {
                Effect::Schedule { cursor, kind } => {
                    let delay = self.delays.sample(self.timing.range_for(kind));
                    self.schedule(cursor, delay);
                }
                Effect::Delivered { .. } | Effect::Restarted => {
                    event = Some(PlaybackEvent::Evaluate);
                }
                Effect::Completed | Effect::Ignored => {}
            }
        }
    }

    fn schedule(&mut self, cursor: usize, delay: Duration) {
        self.cancel_pending();
        trace!(cursor, ?delay, "timer armed");
        self.pending = Some(PendingTimer {
            cursor,
            fires: channel::after(delay),
            token: self.token.child_token(),
        });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.token.cancel();
            trace!(cursor = pending.cursor, "timer cancelled");
        }
    }

    fn publish(&self) {
        if self.token.is_cancelled() {
            return;
        }
        let _ = self.updates.send(self.state.clone());
    }
}
