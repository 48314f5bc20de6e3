//! Stage: the landing page, the chat panel and the loop that runs them.
//!
//! Page content is data: a list of [`SectionSpec`]s, each made of
//! [`Group`]s of [`Block`]s with an [`Entrance`]. The [`Page`] lays them out,
//! observes every revealing group and paints each block through the
//! [`Projection`] of its current animated style.

mod app;
mod block;
mod chat;
mod page;
mod paint;
mod section;

pub use app::{Flow, Landing, Stage};
pub use block::{Align, Block, Ink};
pub use chat::ChatPanel;
pub use page::Page;
pub use paint::Projection;
pub use section::{Entrance, Group, SectionSpec};
