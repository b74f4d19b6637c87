// ── Board state transitions ──
//
// Pure reducers and projections. Side effects (fetches, acknowledgments)
// live in `crate::controller`.

mod filters;
mod selected;
mod unread;

pub use filters::{FilterAction, reduce_filters};
pub use selected::project_selected;
pub use unread::{UnreadAction, UnreadState, reduce_unread};
