//! Actor Model: message-passing threads around the stage loop.
//!
//! - **Input Actor**: polls terminal events, forwards them to the stage
//! - **Ticker Actor**: paces frames
//! - **Presenter Actor**: receives finished frames, diffs and flushes
//! - **Player Actor** (in `sequencer`): delivers scripted chat turns
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ──────────────────▶ │              │
//! └──────────────┘                     │              │
//! ┌──────────────┐        Tick         │  Stage Loop  │
//! │Ticker Thread │ ──────────────────▶ │   (Page +    │
//! └──────────────┘                     │  ChatPanel)  │
//! ┌──────────────┐   PlaybackState     │              │
//! │Player Thread │ ──────────────────▶ │              │
//! └──────────────┘                     └──────┬───────┘
//!                                             │ PresentCommand
//!                                             ▼
//!                                      ┌──────────────┐
//!                                      │Present Thread│
//!                                      └──────────────┘
//! ```

mod input;
mod messages;
mod presenter;
mod ticker;

pub use input::InputActor;
pub use messages::{Control, InputEvent, KeyCode, KeyModifiers, PresentCommand};
pub use presenter::{PresentStats, PresenterActor};
pub use ticker::{Tick, TickerActor};
