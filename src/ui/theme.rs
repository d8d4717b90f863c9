//! Colour palette and text styles used across the UI.
//!
//! White-on-black with a gray selection bar, matching the original deck.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── list panes ─────────────────────────────────────────────
    pub fn row_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::Gray)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    /// Selection bar of the unfocused pane — dimmer so the eye lands on
    /// the focused one.
    pub fn inactive_selected_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn focused_border_style() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn sash_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn button_style() -> Style {
        Style::default()
            .bg(Color::Black)
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    // ── popups ─────────────────────────────────────────────────
    pub fn popup_border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn popup_title_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning_title_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn hint_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }
}
