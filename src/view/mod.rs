//! Views: components painted onto the canvas each frame.

mod nav;
mod palette;
mod traits;
mod transcript;
mod wrap;

pub use nav::NavBar;
pub use palette::Palette;
pub use traits::View;
pub use transcript::{LineKind, Transcript, TranscriptLine, AGENT_AVATAR, USER_AVATAR};
pub use wrap::wrap;
