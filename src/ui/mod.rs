//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the store's display projections and turns them into
//! cells on the terminal.  No filesystem I/O happens here.

pub mod drag_list;
pub mod layout;
pub mod popup;
pub mod theme;
