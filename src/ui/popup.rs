//! Popup overlays — confirmation, text prompt, notice, and context menu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::theme::Theme;

// ───────────────────────────────────────── confirm ───────────

/// Yes/no gate in front of a destructive action.
pub struct ConfirmPopup<'a> {
    pub title: &'a str,
    pub question: &'a str,
}

impl<'a> Widget for ConfirmPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (self.question.len() as u16 + 6).clamp(30, area.width);
        let popup = centered_fixed(width, 7, area);
        Clear.render(popup, buf);

        let block = popup_block(self.title, Theme::warning_title_style());
        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines = vec![
            Line::raw(""),
            Line::raw(format!("  {}", self.question)),
            Line::raw(""),
            Line::from(Span::styled("  [Y]es    [N]o / Esc", Theme::hint_style())),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── prompt ────────────

/// Single-line text entry (category name, import path).
pub struct InputPopup<'a> {
    pub title: &'a str,
    pub prompt: &'a str,
    pub buffer: &'a str,
}

impl<'a> Widget for InputPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_fixed(52, 8, area);
        Clear.render(popup, buf);

        let block = popup_block(self.title, Theme::popup_title_style());
        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines = vec![
            Line::raw(""),
            Line::raw(format!("  {}", self.prompt)),
            Line::from(vec![
                Span::raw("  > "),
                Span::styled(self.buffer, Theme::input_style()),
                Span::styled("▏", Theme::input_style()),
            ]),
            Line::raw(""),
            Line::from(Span::styled("  Enter: confirm  Esc: cancel", Theme::hint_style())),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── notice ────────────

/// Informational or warning message, dismissed with any key.
pub struct NoticePopup<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub warning: bool,
}

impl<'a> Widget for NoticePopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (self.message.len() as u16 + 6).clamp(28, area.width);
        let popup = centered_fixed(width, 7, area);
        Clear.render(popup, buf);

        let title_style = if self.warning {
            Theme::warning_title_style()
        } else {
            Theme::popup_title_style()
        };
        let block = popup_block(self.title, title_style);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines = vec![
            Line::raw(""),
            Line::raw(format!("  {}", self.message)),
            Line::raw(""),
            Line::from(Span::styled("  any key to dismiss", Theme::hint_style())),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── context menu ──────

/// Right-click menu anchored at the pointer.
pub struct MenuPopup<'a> {
    pub items: &'a [&'a str],
    pub selected: usize,
    pub anchor: (u16, u16),
}

impl<'a> MenuPopup<'a> {
    /// The rectangle the menu occupies — shared with the mouse handler so
    /// clicks can be resolved to items.
    pub fn menu_rect(anchor: (u16, u16), items: &[&str], area: Rect) -> Rect {
        let width = items
            .iter()
            .map(|s| s.len() as u16)
            .max()
            .unwrap_or(10)
            .saturating_add(4)
            .min(area.width);
        let height = (items.len() as u16).saturating_add(2).min(area.height);
        let x = anchor.0.min(area.width.saturating_sub(width));
        let y = anchor.1.min(area.height.saturating_sub(height));
        Rect::new(x, y, width, height)
    }

    /// Item index for a click at `(col, row)`, if it lands on one.
    pub fn item_at(anchor: (u16, u16), items: &[&str], area: Rect, col: u16, row: u16) -> Option<usize> {
        let rect = Self::menu_rect(anchor, items, area);
        let inner = Block::default().borders(Borders::ALL).inner(rect);
        if col < inner.x || col >= inner.x + inner.width || row < inner.y {
            return None;
        }
        let index = row.saturating_sub(inner.y) as usize;
        (index < items.len()).then_some(index)
    }
}

impl<'a> Widget for MenuPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = Self::menu_rect(self.anchor, self.items, area);
        Clear.render(rect, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::popup_border_style());
        let inner = block.inner(rect);
        block.render(rect, buf);

        let mut lines = Vec::with_capacity(self.items.len());
        for (i, item) in self.items.iter().enumerate() {
            let style = if i == self.selected {
                Theme::selected_style()
            } else {
                Theme::row_style()
            };
            lines.push(Line::from(Span::styled(format!(" {item} "), style)));
        }
        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

fn popup_block(title: &str, title_style: ratatui::style::Style) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(title_style)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::popup_border_style())
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
