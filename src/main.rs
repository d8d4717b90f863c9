//! Binary entry point: terminal setup, the draw/event loop, teardown.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use script_deck::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{AppState, Overlay, PaneFocus},
};
use script_deck::config::{self, AppConfig};
use script_deck::ui::{
    drag_list::DragList,
    layout::{clamp_sash, AppLayout},
    popup::{ConfirmPopup, InputPopup, MenuPopup, NoticePopup},
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Two-pane script organizer and launcher")]
struct Cli {
    /// Config file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file (defaults to the platform data directory).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

// ───────────────────────────────────────── drawing ───────────

const KEY_HINTS: &str =
    " q quit │ Tab focus │ ↑↓ move │ Enter run │ a add category │ i import │ d delete │ e edit";

fn draw(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    state.terminal_area = area;
    state.config.sash_position = clamp_sash(area, state.config.sash_position);
    let layout = AppLayout::from_area(area, state.config.sash_position);

    let browse = state.overlay == Overlay::None;

    // ── category pane ─────────────────────────────────────────
    let category_focused = browse && state.focus == PaneFocus::Categories;
    let category_block = Block::default()
        .title(" Categories ")
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(if category_focused {
            Theme::focused_border_style()
        } else {
            Theme::border_style()
        });
    let category_list = DragList::new()
        .block(category_block)
        .focused(category_focused);
    frame.render_stateful_widget(category_list, layout.category_area, &mut state.category_list);

    let import = Paragraph::new(" [ Import Scripts ]").style(Theme::button_style());
    frame.render_widget(import, layout.import_area);
    let add = Paragraph::new(" [ Add Category ]").style(Theme::button_style());
    frame.render_widget(add, layout.add_category_area);

    // ── sash ──────────────────────────────────────────────────
    let sash_lines: Vec<Line> = (0..layout.sash_area.height).map(|_| Line::raw("│")).collect();
    frame.render_widget(
        Paragraph::new(sash_lines).style(Theme::sash_style()),
        layout.sash_area,
    );

    // ── script pane ───────────────────────────────────────────
    let script_focused = browse && state.focus == PaneFocus::Scripts;
    let script_title = match state.selected_category {
        Some(ref name) => format!(" Scripts: {name} "),
        None => " Scripts ".to_string(),
    };
    let script_block = Block::default()
        .title(script_title)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(if script_focused {
            Theme::focused_border_style()
        } else {
            Theme::border_style()
        });
    let script_list = DragList::new().block(script_block).focused(script_focused);
    frame.render_stateful_widget(script_list, layout.script_area, &mut state.script_list);

    // ── status bar ────────────────────────────────────────────
    let status_text = state
        .status_message
        .as_ref()
        .map(|(m, _)| m.as_str())
        .unwrap_or(KEY_HINTS);
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);

    // ── overlay ───────────────────────────────────────────────
    draw_overlay(frame, state, area);
}

fn draw_overlay(frame: &mut Frame, state: &AppState, area: Rect) {
    match state.overlay {
        Overlay::None => {}
        Overlay::AddCategoryPrompt => frame.render_widget(
            InputPopup {
                title: " Add Category ",
                prompt: "Category name:",
                buffer: &state.input,
            },
            area,
        ),
        Overlay::ImportPrompt => frame.render_widget(
            InputPopup {
                title: " Import Scripts ",
                prompt: "Script path or glob (.bat / .ps1):",
                buffer: &state.input,
            },
            area,
        ),
        Overlay::ConfirmDeleteCategory { ref name } => {
            let question = format!("Delete category '{name}' and its scripts?");
            frame.render_widget(
                ConfirmPopup {
                    title: " Delete Category ",
                    question: &question,
                },
                area,
            );
        }
        Overlay::ConfirmDeleteScript { ref label, .. } => {
            let question = format!("Delete script '{label}'?");
            frame.render_widget(
                ConfirmPopup {
                    title: " Delete Script ",
                    question: &question,
                },
                area,
            );
        }
        Overlay::CategoryMenu { anchor, selected } => frame.render_widget(
            MenuPopup {
                items: handler::CATEGORY_MENU_ITEMS,
                selected,
                anchor,
            },
            area,
        ),
        Overlay::ScriptMenu { anchor, selected } => frame.render_widget(
            MenuPopup {
                items: handler::SCRIPT_MENU_ITEMS,
                selected,
                anchor,
            },
            area,
        ),
        Overlay::Notice {
            ref title,
            ref message,
            warning,
        } => frame.render_widget(
            NoticePopup {
                title,
                message,
                warning,
            },
            area,
        ),
    }
}

// ───────────────────────────────────────── main ──────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.unwrap_or_else(config::default_log_path);
    let _log_guard = script_deck::logging::init(&log_path)?;

    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let app_config = AppConfig::load(&config_path);
    let mut state = AppState::new(app_config, config_path);

    tracing::info!("Application started");

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(Duration::from_millis(100));

    // ── event loop ────────────────────────────────────────────
    loop {
        // Draw first so input is always handled against the layout the user
        // actually sees.
        terminal.draw(|frame| draw(frame, &mut state))?;

        if let Some(event) = events.recv().await {
            match event {
                AppEvent::Key(k) => handler::handle_key(&mut state, k),
                AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                AppEvent::Resize(w, h) => state.terminal_area = Rect::new(0, 0, w, h),
                AppEvent::Tick => state.expire_status(),
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    state.save();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!("Application ended");
    Ok(())
}
