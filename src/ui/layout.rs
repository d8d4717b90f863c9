//! Layout — split the terminal into the two panes, buttons, sash and
//! status bar, and answer "which control is under this point?".
//!
//! The window-level hit test lives here rather than inside the list widget:
//! a drop target is resolved by the owner from a point, so the widget never
//! needs a back-reference to its parents.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use crate::config::MIN_SASH;

/// Minimum width kept for the script pane when the sash is dragged right.
const MIN_RIGHT: u16 = 10;

/// The named controls of the single application window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    CategoryList,
    ScriptList,
    ImportButton,
    AddCategoryButton,
    Sash,
    StatusBar,
}

/// Computed screen regions for one frame.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    /// Category pane, border included.
    pub category_area: Rect,
    /// Rows inside the category pane border.
    pub category_content: Rect,
    /// "Import scripts" button row.
    pub import_area: Rect,
    /// "Add category" button row.
    pub add_category_area: Rect,
    /// The one-column divider between the panes.
    pub sash_area: Rect,
    /// Script pane, border included.
    pub script_area: Rect,
    /// Rows inside the script pane border.
    pub script_content: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area and the sash offset.
    pub fn from_area(area: Rect, sash: u16) -> Self {
        let sash = clamp_sash(area, sash);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // panes
                Constraint::Length(1), // status bar
            ])
            .split(area);
        let panes = vertical[0];
        let status_area = vertical[1];

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(sash),
                Constraint::Length(1), // sash column
                Constraint::Min(MIN_RIGHT),
            ])
            .split(panes);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // category list
                Constraint::Length(1), // import button
                Constraint::Length(1), // add-category button
            ])
            .split(horizontal[0]);

        let category_area = left[0];
        let script_area = horizontal[2];
        let bordered = Block::default().borders(Borders::ALL);

        Self {
            category_area,
            category_content: bordered.inner(category_area),
            import_area: left[1],
            add_category_area: left[2],
            sash_area: horizontal[1],
            script_area,
            script_content: bordered.inner(script_area),
            status_area,
        }
    }

    /// Window-level hit test: the control under `(col, row)`, if any.
    /// List panes claim their whole bordered rectangle, matching how the
    /// original resolved the widget under the cursor.
    pub fn control_at(&self, col: u16, row: u16) -> Option<Control> {
        if point_in_rect(self.sash_area, col, row) {
            Some(Control::Sash)
        } else if point_in_rect(self.category_area, col, row) {
            Some(Control::CategoryList)
        } else if point_in_rect(self.script_area, col, row) {
            Some(Control::ScriptList)
        } else if point_in_rect(self.import_area, col, row) {
            Some(Control::ImportButton)
        } else if point_in_rect(self.add_category_area, col, row) {
            Some(Control::AddCategoryButton)
        } else if point_in_rect(self.status_area, col, row) {
            Some(Control::StatusBar)
        } else {
            None
        }
    }
}

/// Clamp a requested sash offset to `[MIN_SASH, width - MIN_RIGHT - 1]`.
pub fn clamp_sash(area: Rect, sash: u16) -> u16 {
    let max = area
        .width
        .saturating_sub(MIN_RIGHT + 1)
        .max(MIN_SASH);
    sash.clamp(MIN_SASH, max)
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
