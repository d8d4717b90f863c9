//! A list widget whose rows can be reordered by press-drag-release.
//!
//! The widget owns only a display projection (`rows`) — rendered strings,
//! nothing more.  During a drag it shuffles its own rows so the dragged row
//! follows the pointer; on release it hands the owner a [`DropReport`] and
//! the owner decides whether that was a reorder or a cross-list transfer and
//! performs all store mutation and persistence itself.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, StatefulWidget, Widget},
};

use super::theme::Theme;

// ───────────────────────────────────────── state ─────────────

/// Persistent per-list state: rows, selection, scroll and drag tracking.
#[derive(Debug, Default)]
pub struct DragListState {
    rows: Vec<String>,
    /// Highlighted row, if any.
    pub selected: Option<usize>,
    /// Vertical scroll offset (first visible row).
    pub offset: usize,
    /// Origin index of the in-flight drag.  Updated as the dragged row
    /// follows the pointer, so on release it is the row's current position.
    drag_start: Option<usize>,
}

/// What the owner learns when a drag ends.  The origin index is *pre-drop*:
/// any intra-list reordering already applied, no store mutation performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropReport {
    pub origin: usize,
    pub release: (u16, u16),
}

impl DragListState {
    /// Replace the display projection.  Selection is clamped, any in-flight
    /// drag is abandoned.
    pub fn set_rows(&mut self, rows: Vec<String>) {
        self.rows = rows;
        self.drag_start = None;
        self.selected = match self.selected {
            Some(_) if self.rows.is_empty() => None,
            Some(i) => Some(i.min(self.rows.len() - 1)),
            None => None,
        };
        self.offset = self.offset.min(self.rows.len().saturating_sub(1));
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.set_rows(Vec::new());
        self.selected = None;
        self.offset = 0;
    }

    pub fn select(&mut self, index: usize) {
        if index < self.rows.len() {
            self.selected = Some(index);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = match self.selected {
            Some(i) => Some(i.saturating_sub(1)),
            None if !self.rows.is_empty() => Some(0),
            None => None,
        };
    }

    pub fn select_next(&mut self) {
        self.selected = match self.selected {
            Some(i) if i + 1 < self.rows.len() => Some(i + 1),
            Some(i) => Some(i),
            None if !self.rows.is_empty() => Some(0),
            None => None,
        };
    }

    // ── row hit-testing ─────────────────────────────────────────

    /// Raw row index for a screen row inside `content` — may be past the
    /// end of the list.
    pub fn hit_row(&self, content: Rect, row: u16) -> usize {
        row.saturating_sub(content.y) as usize + self.offset
    }

    /// Index of the row nearest the screen row: the hit row, clamped to the
    /// last entry.  `None` when the list is empty.
    pub fn nearest_row(&self, content: Rect, row: u16) -> Option<usize> {
        if self.rows.is_empty() {
            None
        } else {
            Some(self.hit_row(content, row).min(self.rows.len() - 1))
        }
    }

    // ── drag state machine ──────────────────────────────────────

    /// Idle → Dragging: record the row nearest the press point.
    pub fn begin_drag(&mut self, content: Rect, row: u16) {
        if let Some(index) = self.nearest_row(content, row) {
            self.selected = Some(index);
            self.drag_start = Some(index);
        }
    }

    /// Pointer motion while dragging.  When the raw hit row is a valid index
    /// that differs from the origin, the dragged row is moved there and the
    /// origin follows it.  A hit past the last row is a no-op; callers
    /// suppress the call entirely while the pointer is outside the widget.
    pub fn drag_over(&mut self, content: Rect, row: u16) {
        let Some(start) = self.drag_start else {
            return;
        };
        let end = self.hit_row(content, row);
        if end >= self.rows.len() || end == start {
            return;
        }
        let dragged = self.rows.remove(start);
        self.rows.insert(end, dragged);
        self.drag_start = Some(end);
        self.selected = Some(end);
    }

    /// Dragging → Idle.  Returns the normalized drop report; `None` when no
    /// drag was in flight (a stray release).
    pub fn end_drag(&mut self, release: (u16, u16)) -> Option<DropReport> {
        self.drag_start.take().map(|origin| DropReport { origin, release })
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    /// Keep the selected row visible within a viewport of `height` rows.
    fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        let selected = self.selected.unwrap_or(0);
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + height {
            self.offset = selected - height + 1;
        }
    }
}

// ───────────────────────────────────────── widget ────────────

/// The rendering half — created fresh each frame from the shared state.
pub struct DragList<'a> {
    block: Option<Block<'a>>,
    /// Render the selection bar with the focused or unfocused style.
    focused: bool,
}

impl<'a> DragList<'a> {
    pub fn new() -> Self {
        Self {
            block: None,
            focused: false,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<'a> Default for DragList<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> StatefulWidget for DragList<'a> {
    type State = DragListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        state.clamp_scroll(inner.height as usize);

        let visible = state
            .rows
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(inner.height as usize);

        for (i, (row_idx, label)) in visible.enumerate() {
            let y = inner.y + i as u16;
            let style = if state.selected == Some(row_idx) {
                if self.focused {
                    Theme::selected_style()
                } else {
                    Theme::inactive_selected_style()
                }
            } else {
                Theme::row_style()
            };
            let line = Line::styled(label.as_str(), style);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(rows: &[&str]) -> DragListState {
        let mut state = DragListState::default();
        state.set_rows(rows.iter().map(|s| s.to_string()).collect());
        state
    }

    fn content() -> Rect {
        // Content rows map 1:1 to screen rows 1..=10.
        Rect::new(1, 1, 20, 10)
    }

    #[test]
    fn press_records_nearest_row_as_origin() {
        let mut state = state_with(&["a", "b", "c"]);
        state.begin_drag(content(), 2);
        assert!(state.is_dragging());
        assert_eq!(state.selected, Some(1));

        let report = state.end_drag((5, 2)).unwrap();
        assert_eq!(report.origin, 1);
    }

    #[test]
    fn press_below_last_row_clamps_to_nearest() {
        let mut state = state_with(&["a", "b"]);
        state.begin_drag(content(), 9);
        assert_eq!(state.selected, Some(1));
    }

    #[test]
    fn dragged_row_follows_the_pointer() {
        let mut state = state_with(&["a", "b", "c", "d"]);
        state.begin_drag(content(), 1); // grab "a"

        state.drag_over(content(), 3); // over index 2
        assert_eq!(state.rows(), &["b", "c", "a", "d"]);

        state.drag_over(content(), 4); // over index 3
        assert_eq!(state.rows(), &["b", "c", "d", "a"]);

        // Back up one row — origin tracked the row the whole way.
        state.drag_over(content(), 2);
        assert_eq!(state.rows(), &["b", "a", "c", "d"]);

        let report = state.end_drag((5, 2)).unwrap();
        assert_eq!(report.origin, 1);
        assert!(!state.is_dragging());
    }

    #[test]
    fn dragging_below_the_last_row_is_a_no_op() {
        let mut state = state_with(&["a", "b"]);
        state.begin_drag(content(), 1);
        state.drag_over(content(), 8); // hit index 7 >= len
        assert_eq!(state.rows(), &["a", "b"]);
        assert_eq!(state.end_drag((5, 8)).unwrap().origin, 0);
    }

    #[test]
    fn motion_over_the_origin_row_changes_nothing() {
        let mut state = state_with(&["a", "b", "c"]);
        state.begin_drag(content(), 2);
        state.drag_over(content(), 2);
        assert_eq!(state.rows(), &["a", "b", "c"]);
    }

    #[test]
    fn stray_release_without_press_reports_nothing() {
        let mut state = state_with(&["a"]);
        assert_eq!(state.end_drag((0, 0)), None);
    }

    #[test]
    fn set_rows_abandons_drag_and_clamps_selection() {
        let mut state = state_with(&["a", "b", "c"]);
        state.begin_drag(content(), 3);
        state.set_rows(vec!["x".into()]);
        assert!(!state.is_dragging());
        assert_eq!(state.selected, Some(0));
    }

    #[test]
    fn begin_drag_on_empty_list_is_ignored() {
        let mut state = state_with(&[]);
        state.begin_drag(content(), 1);
        assert!(!state.is_dragging());
        assert_eq!(state.selected, None);
    }

    #[test]
    fn scrolled_list_offsets_hit_rows() {
        let mut state = state_with(&["a", "b", "c", "d", "e"]);
        state.offset = 2;
        assert_eq!(state.hit_row(content(), 1), 2);
        assert_eq!(state.nearest_row(content(), 9), Some(4));
    }
}
