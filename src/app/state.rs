//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event
//! handling).  The store inside `config` is the single authority for
//! category/script data; both list states hold only rendered projections
//! that are re-synced by the `render_*` methods after every mutation.

use std::path::PathBuf;
use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::store::script_labels;
use crate::ui::drag_list::DragListState;
use crate::ui::layout::Control;

/// Which pane keyboard input goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaneFocus {
    #[default]
    Categories,
    Scripts,
}

/// Modal overlay on top of the two panes, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    /// Text prompt for a new category name.
    AddCategoryPrompt,
    /// Text prompt for a script path or glob pattern.
    ImportPrompt,
    /// Yes/no gate before removing a category.
    ConfirmDeleteCategory { name: String },
    /// Yes/no gate before removing a script row.
    ConfirmDeleteScript { index: usize, label: String },
    /// Right-click menu on the category pane.
    CategoryMenu { anchor: (u16, u16), selected: usize },
    /// Right-click menu on the script pane.
    ScriptMenu { anchor: (u16, u16), selected: usize },
    /// Info or warning message.
    Notice {
        title: String,
        message: String,
        warning: bool,
    },
}

/// How long a status-bar message stays up before the tick clears it.
pub const STATUS_TTL_MS: u64 = 4000;

/// Double-click detection window.
pub const DOUBLE_CLICK_MS: u64 = 300;

/// Top-level application state.
pub struct AppState {
    /// Persisted state: the category store, window size, sash, editor.
    pub config: AppConfig,
    /// Where `config` is written after every mutation.
    pub config_path: PathBuf,
    /// Currently selected category name.  At most one; `None` only when the
    /// store is empty.
    pub selected_category: Option<String>,
    /// Category pane projection.
    pub category_list: DragListState,
    /// Script pane projection for the selected category.
    pub script_list: DragListState,
    pub focus: PaneFocus,
    pub overlay: Overlay,
    /// Text buffer backing the prompt overlays.
    pub input: String,
    /// Transient message in the bottom bar.
    pub status_message: Option<(String, Instant)>,
    /// `true` while the pane divider is being dragged.
    pub dragging_sash: bool,
    /// Full terminal area from the last draw — the mouse handler needs it
    /// to recompute the layout.
    pub terminal_area: Rect,
    /// Last left click (control, row index, time) for double-click detection.
    pub last_click: Option<(Control, usize, Instant)>,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: AppConfig, config_path: PathBuf) -> Self {
        let mut state = Self {
            config,
            config_path,
            selected_category: None,
            category_list: DragListState::default(),
            script_list: DragListState::default(),
            focus: PaneFocus::default(),
            overlay: Overlay::default(),
            input: String::new(),
            status_message: None,
            dragging_sash: false,
            terminal_area: Rect::default(),
            last_click: None,
            should_quit: false,
        };

        state.render_categories();
        if let Some(first) = state.config.categories.first_name() {
            let first = first.to_string();
            state.select_category(&first);
        }
        state
    }

    // ── projections ─────────────────────────────────────────────

    /// Re-render the category pane rows from the store, keeping the
    /// selection bar on the selected category.
    pub fn render_categories(&mut self) {
        self.category_list.set_rows(self.config.categories.names());
        if let Some(ref name) = self.selected_category {
            if let Some(index) = self
                .config
                .categories
                .names()
                .iter()
                .position(|n| n == name)
            {
                self.category_list.select(index);
            }
        }
    }

    /// Re-render the script pane rows from the selected category's stored
    /// order.
    pub fn render_scripts(&mut self) {
        match self.selected_category {
            Some(ref name) => {
                let labels = script_labels(self.config.categories.scripts_of(name));
                self.script_list.set_rows(labels);
            }
            None => self.script_list.clear(),
        }
    }

    /// Make `name` the selected category and project its scripts.
    pub fn select_category(&mut self, name: &str) {
        self.selected_category = Some(name.to_string());
        self.render_categories();
        self.render_scripts();
    }

    /// Reset selection after the selected category disappeared: first
    /// remaining category, or nothing at all.
    pub fn reset_selection(&mut self) {
        match self.config.categories.first_name().map(str::to_string) {
            Some(first) => self.select_category(&first),
            None => {
                self.selected_category = None;
                self.render_categories();
                self.script_list.clear();
            }
        }
    }

    // ── persistence & status ────────────────────────────────────

    /// Persist the full configuration.  A failed save is reported in the
    /// status bar instead of tearing down the UI.
    pub fn save(&mut self) {
        self.config.window_size.width = self.terminal_area.width as u32;
        self.config.window_size.height = self.terminal_area.height as u32;
        if let Err(e) = self.config.save(&self.config_path) {
            tracing::error!("config save failed: {e:#}");
            self.set_status(format!("Save failed: {e}"));
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Called on ticks — expire a stale status message.
    pub fn expire_status(&mut self) {
        if let Some((_, at)) = self.status_message {
            if at.elapsed().as_millis() as u64 >= STATUS_TTL_MS {
                self.status_message = None;
            }
        }
    }

    pub fn notify(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.overlay = Overlay::Notice {
            title: title.into(),
            message: message.into(),
            warning: false,
        };
    }

    pub fn warn(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.overlay = Overlay::Notice {
            title: title.into(),
            message: message.into(),
            warning: true,
        };
    }
}
