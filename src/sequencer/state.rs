//! Playback state and the pure transition function.

use super::script::{Script, Sender, Turn};
use tracing::debug;

/// Where playback stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Fresh; nothing scheduled yet.
    Idle,
    /// Waiting out an agent turn's typing delay.
    AwaitingAgent,
    /// Waiting out a user turn's delay.
    AwaitingUser,
    /// A turn just landed; the next one has not been scheduled.
    Delivered,
    /// Every turn has been delivered.
    Complete,
}

/// Inputs to [`advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Look at the turn under the cursor and schedule it.
    Evaluate,
    /// The delay scheduled for turn `cursor` has elapsed.
    DelayElapsed {
        /// Cursor the delay was scheduled for.
        cursor: usize,
    },
    /// Start over from the first turn.
    Reset,
}

/// Why the driver must wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitKind {
    /// Agent is "typing"; randomized delay.
    Typing,
    /// User is "composing"; fixed delay.
    Composing,
}

/// What the driver must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Start a delay for turn `cursor`, then send `DelayElapsed`.
    Schedule {
        /// Turn being waited on.
        cursor: usize,
        /// Which delay to use.
        kind: WaitKind,
    },
    /// A turn was appended; send `Evaluate` to continue.
    Delivered {
        /// Index of the delivered turn.
        index: usize,
    },
    /// Playback finished; offer a replay.
    Completed,
    /// State was reinitialized; send `Evaluate` to restart.
    Restarted,
    /// The event did not apply in the current phase.
    Ignored,
}

/// Observable playback state.
///
/// `delivered.len() == cursor` holds after every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackState {
    delivered: Vec<Turn>,
    cursor: usize,
    typing: bool,
    complete: bool,
    phase: Phase,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackState {
    /// Fresh state at the first turn.
    pub const fn new() -> Self {
        Self {
            delivered: Vec::new(),
            cursor: 0,
            typing: false,
            complete: false,
            phase: Phase::Idle,
        }
    }

    /// Turns delivered so far, oldest first.
    pub fn delivered(&self) -> &[Turn] {
        &self.delivered
    }

    /// Index of the next turn to deliver.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the typing indicator is showing.
    pub const fn is_typing(&self) -> bool {
        self.typing
    }

    /// Whether every turn has been delivered.
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Reinitialize every field to its starting value.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Apply one event to `state` for `script`.
///
/// Pure: the input state is untouched and no timers are started. The
/// returned [`Effect`] tells the caller what to do next.
pub fn advance(state: &PlaybackState, script: Script, event: PlaybackEvent) -> (PlaybackState, Effect) {
    let mut next = state.clone();
    let effect = match (event, state.phase) {
        (PlaybackEvent::Reset, _) => {
            next.reset();
            Effect::Restarted
        }
        (PlaybackEvent::Evaluate, Phase::Idle | Phase::Delivered) => {
            match script.get(next.cursor) {
                None => {
                    next.phase = Phase::Complete;
                    next.complete = true;
                    Effect::Completed
                }
                Some(turn) => {
                    let kind = match turn.sender {
                        Sender::Agent => {
                            next.phase = Phase::AwaitingAgent;
                            next.typing = true;
                            WaitKind::Typing
                        }
                        Sender::User => {
                            next.phase = Phase::AwaitingUser;
                            WaitKind::Composing
                        }
                    };
                    Effect::Schedule {
                        cursor: next.cursor,
                        kind,
                    }
                }
            }
        }
        (PlaybackEvent::DelayElapsed { cursor }, Phase::AwaitingAgent | Phase::AwaitingUser)
            if cursor == state.cursor =>
        {
            match script.get(cursor) {
                Some(turn) => {
                    next.delivered.push(*turn);
                    next.typing = false;
                    next.cursor += 1;
                    next.phase = Phase::Delivered;
                    Effect::Delivered { index: cursor }
                }
                None => Effect::Ignored,
            }
        }
        (event, phase) => {
            debug!(?event, ?phase, cursor = state.cursor, "playback event ignored");
            Effect::Ignored
        }
    };
    (next, effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::script::LUNA_SCRIPT;

    const HI_TURNS: &[Turn] = &[Turn::agent("hi"), Turn::user("hello")];
    const HI: Script = Script::new(HI_TURNS);

    /// Run `script` to completion, checking invariants after every step.
    fn play_through(script: Script) -> PlaybackState {
        let mut state = PlaybackState::new();
        let mut event = PlaybackEvent::Evaluate;
        for _ in 0..(script.len() * 2 + 2) {
            let before = state.cursor();
            let (next, effect) = advance(&state, script, event);
            assert!(next.cursor() >= before, "cursor went backwards");
            assert_eq!(next.delivered().len(), next.cursor());
            state = next;
            event = match effect {
                Effect::Schedule { cursor, .. } => PlaybackEvent::DelayElapsed { cursor },
                Effect::Delivered { .. } | Effect::Restarted => PlaybackEvent::Evaluate,
                Effect::Completed => return state,
                Effect::Ignored => panic!("unexpected ignored event"),
            };
        }
        panic!("playback did not complete");
    }

    #[test]
    fn test_two_turn_scenario() {
        let state = PlaybackState::new();

        let (state, effect) = advance(&state, HI, PlaybackEvent::Evaluate);
        assert_eq!(effect, Effect::Schedule { cursor: 0, kind: WaitKind::Typing });
        assert!(state.is_typing());
        assert_eq!(state.phase(), Phase::AwaitingAgent);

        let (state, effect) = advance(&state, HI, PlaybackEvent::DelayElapsed { cursor: 0 });
        assert_eq!(effect, Effect::Delivered { index: 0 });
        assert_eq!(state.delivered(), &[Turn::agent("hi")]);
        assert!(!state.is_typing());
        assert_eq!(state.cursor(), 1);

        let (state, effect) = advance(&state, HI, PlaybackEvent::Evaluate);
        assert_eq!(effect, Effect::Schedule { cursor: 1, kind: WaitKind::Composing });
        assert!(!state.is_typing());

        let (state, _) = advance(&state, HI, PlaybackEvent::DelayElapsed { cursor: 1 });
        assert_eq!(state.delivered(), &[Turn::agent("hi"), Turn::user("hello")]);
        assert_eq!(state.cursor(), 2);
        assert!(!state.is_complete());

        let (state, effect) = advance(&state, HI, PlaybackEvent::Evaluate);
        assert_eq!(effect, Effect::Completed);
        assert!(state.is_complete());
        assert_eq!(state.phase(), Phase::Complete);
    }

    #[test]
    fn test_script_fidelity() {
        let state = play_through(LUNA_SCRIPT);
        let delivered: Vec<_> = state.delivered().iter().map(|t| t.sender).collect();
        let scripted: Vec<_> = LUNA_SCRIPT.turns().iter().map(|t| t.sender).collect();
        assert_eq!(delivered, scripted);
        assert_eq!(state.delivered(), LUNA_SCRIPT.turns());
    }

    #[test]
    fn test_reset_matches_fresh_state() {
        let done = play_through(HI);
        let (state, effect) = advance(&done, HI, PlaybackEvent::Reset);
        assert_eq!(effect, Effect::Restarted);
        assert_eq!(state, PlaybackState::new());

        let (again, _) = advance(&state, HI, PlaybackEvent::Reset);
        assert_eq!(again, PlaybackState::new());
    }

    #[test]
    fn test_complete_only_leaves_through_reset() {
        let done = play_through(HI);
        for event in [PlaybackEvent::Evaluate, PlaybackEvent::DelayElapsed { cursor: 1 }] {
            let (state, effect) = advance(&done, HI, event);
            assert_eq!(effect, Effect::Ignored);
            assert_eq!(state, done);
        }
    }

    #[test]
    fn test_stale_delay_is_ignored() {
        let (waiting, _) = advance(&PlaybackState::new(), HI, PlaybackEvent::Evaluate);
        let (state, effect) = advance(&waiting, HI, PlaybackEvent::DelayElapsed { cursor: 3 });
        assert_eq!(effect, Effect::Ignored);
        assert_eq!(state, waiting);

        // A delay firing after a reset belongs to the old run.
        let (fresh, _) = advance(&waiting, HI, PlaybackEvent::Reset);
        let (state, effect) = advance(&fresh, HI, PlaybackEvent::DelayElapsed { cursor: 0 });
        assert_eq!(effect, Effect::Ignored);
        assert!(state.delivered().is_empty());
    }

    #[test]
    fn test_only_one_pending_delay() {
        let (waiting, _) = advance(&PlaybackState::new(), HI, PlaybackEvent::Evaluate);
        let (state, effect) = advance(&waiting, HI, PlaybackEvent::Evaluate);
        assert_eq!(effect, Effect::Ignored);
        assert_eq!(state, waiting);
    }

    #[test]
    fn test_empty_script_completes_immediately() {
        let empty = Script::new(&[]);
        let (state, effect) = advance(&PlaybackState::new(), empty, PlaybackEvent::Evaluate);
        assert_eq!(effect, Effect::Completed);
        assert!(state.is_complete());
    }
}
