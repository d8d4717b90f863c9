//! Two-pane terminal organizer and launcher for Windows scripts.
//!
//! Categories on the left, the selected category's scripts on the right.
//! Rows in either pane are reordered by dragging with the mouse, scripts
//! move between categories by dropping them onto a category row, and every
//! mutation is written straight back to a JSON config file.

pub mod app;
pub mod config;
pub mod core;
pub mod logging;
pub mod ui;
