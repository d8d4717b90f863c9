//! Input handling — maps key/mouse events to state mutations.
//!
//! This is the controller the drop reports flow into: the drag list only
//! reorders its own rows, everything that touches the store or the config
//! file happens here.

use std::path::PathBuf;
use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::core::launch;
use crate::core::store::is_supported_script;
use crate::ui::drag_list::DropReport;
use crate::ui::layout::{clamp_sash, point_in_rect, AppLayout, Control};
use crate::ui::popup::MenuPopup;

use super::state::{AppState, Overlay, PaneFocus, DOUBLE_CLICK_MS};

/// Entries of the category context menu, in display order.
pub const CATEGORY_MENU_ITEMS: &[&str] = &["Delete"];
/// Entries of the script context menu, in display order.
pub const SCRIPT_MENU_ITEMS: &[&str] = &["Delete", "Open in editor"];

// ── keys ────────────────────────────────────────────────────────

/// Process a key event, dispatching based on the active overlay.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of overlay.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.overlay.clone() {
        Overlay::None => handle_browse_key(state, key),
        Overlay::AddCategoryPrompt => handle_prompt_key(state, key, confirm_add_category),
        Overlay::ImportPrompt => handle_prompt_key(state, key, confirm_import),
        Overlay::ConfirmDeleteCategory { name } => {
            handle_confirm_key(state, key, |s| delete_category(s, &name));
        }
        Overlay::ConfirmDeleteScript { index, .. } => {
            handle_confirm_key(state, key, |s| delete_script(s, index));
        }
        Overlay::CategoryMenu { anchor, selected } => {
            handle_menu_key(state, key, anchor, selected, CATEGORY_MENU_ITEMS, true);
        }
        Overlay::ScriptMenu { anchor, selected } => {
            handle_menu_key(state, key, anchor, selected, SCRIPT_MENU_ITEMS, false);
        }
        Overlay::Notice { .. } => {
            state.overlay = Overlay::None;
        }
    }
}

fn handle_browse_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => state.should_quit = true,
        KeyCode::Tab => {
            state.focus = match state.focus {
                PaneFocus::Categories => PaneFocus::Scripts,
                PaneFocus::Scripts => PaneFocus::Categories,
            };
        }
        KeyCode::Up | KeyCode::Char('k') => match state.focus {
            PaneFocus::Categories => {
                state.category_list.select_prev();
                sync_category_selection(state);
            }
            PaneFocus::Scripts => state.script_list.select_prev(),
        },
        KeyCode::Down | KeyCode::Char('j') => match state.focus {
            PaneFocus::Categories => {
                state.category_list.select_next();
                sync_category_selection(state);
            }
            PaneFocus::Scripts => state.script_list.select_next(),
        },
        KeyCode::Enter => {
            if state.focus == PaneFocus::Scripts {
                execute_selected_script(state);
            }
        }
        KeyCode::Char('a') => open_add_category_prompt(state),
        KeyCode::Char('i') => open_import_prompt(state),
        KeyCode::Char('d') => match state.focus {
            PaneFocus::Categories => request_delete_category(state),
            PaneFocus::Scripts => request_delete_script(state),
        },
        KeyCode::Char('e') => {
            if state.focus == PaneFocus::Scripts {
                open_selected_in_editor(state);
            }
        }
        _ => {}
    }
}

fn handle_prompt_key(state: &mut AppState, key: KeyEvent, confirm: fn(&mut AppState, String)) {
    match key.code {
        KeyCode::Esc => {
            state.input.clear();
            state.overlay = Overlay::None;
        }
        KeyCode::Enter => {
            let input = std::mem::take(&mut state.input);
            state.overlay = Overlay::None;
            confirm(state, input);
        }
        KeyCode::Backspace => {
            state.input.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_key(state: &mut AppState, key: KeyEvent, action: impl FnOnce(&mut AppState)) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            state.overlay = Overlay::None;
            action(state);
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.overlay = Overlay::None;
        }
        _ => {}
    }
}

fn handle_menu_key(
    state: &mut AppState,
    key: KeyEvent,
    anchor: (u16, u16),
    selected: usize,
    items: &[&str],
    category_menu: bool,
) {
    match key.code {
        KeyCode::Esc => state.overlay = Overlay::None,
        KeyCode::Up | KeyCode::Char('k') => {
            let selected = selected.saturating_sub(1);
            state.overlay = if category_menu {
                Overlay::CategoryMenu { anchor, selected }
            } else {
                Overlay::ScriptMenu { anchor, selected }
            };
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let selected = (selected + 1).min(items.len() - 1);
            state.overlay = if category_menu {
                Overlay::CategoryMenu { anchor, selected }
            } else {
                Overlay::ScriptMenu { anchor, selected }
            };
        }
        KeyCode::Enter => {
            state.overlay = Overlay::None;
            activate_menu_item(state, selected, category_menu);
        }
        _ => {}
    }
}

fn activate_menu_item(state: &mut AppState, index: usize, category_menu: bool) {
    if category_menu {
        match index {
            0 => request_delete_category(state),
            _ => {}
        }
    } else {
        match index {
            0 => request_delete_script(state),
            1 => open_selected_in_editor(state),
            _ => {}
        }
    }
}

// ── mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    // Context menus take the pointer; other overlays are keyboard-only.
    match state.overlay.clone() {
        Overlay::CategoryMenu { anchor, .. } => {
            handle_menu_mouse(state, mouse, anchor, CATEGORY_MENU_ITEMS, true);
            return;
        }
        Overlay::ScriptMenu { anchor, .. } => {
            handle_menu_mouse(state, mouse, anchor, SCRIPT_MENU_ITEMS, false);
            return;
        }
        Overlay::Notice { .. } => {
            if matches!(mouse.kind, MouseEventKind::Down(_)) {
                state.overlay = Overlay::None;
            }
            return;
        }
        Overlay::None => {}
        _ => return,
    }

    let layout = AppLayout::from_area(state.terminal_area, state.config.sash_position);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            handle_left_press(state, &layout, mouse.column, mouse.row);
        }
        MouseEventKind::Down(MouseButton::Right) => {
            handle_right_press(state, &layout, mouse.column, mouse.row);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            handle_drag_motion(state, &layout, mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            handle_release(state, &layout, mouse.column, mouse.row);
        }
        MouseEventKind::ScrollUp => match layout.control_at(mouse.column, mouse.row) {
            Some(Control::CategoryList) => {
                state.category_list.select_prev();
                sync_category_selection(state);
            }
            Some(Control::ScriptList) => state.script_list.select_prev(),
            _ => {}
        },
        MouseEventKind::ScrollDown => match layout.control_at(mouse.column, mouse.row) {
            Some(Control::CategoryList) => {
                state.category_list.select_next();
                sync_category_selection(state);
            }
            Some(Control::ScriptList) => state.script_list.select_next(),
            _ => {}
        },
        _ => {}
    }
}

fn handle_left_press(state: &mut AppState, layout: &AppLayout, col: u16, row: u16) {
    match layout.control_at(col, row) {
        Some(Control::Sash) => {
            state.dragging_sash = true;
        }
        Some(Control::CategoryList) => {
            state.focus = PaneFocus::Categories;
            if point_in_rect(layout.category_content, col, row) {
                state.category_list.begin_drag(layout.category_content, row);
                sync_category_selection(state);
                remember_click(state, Control::CategoryList);
            }
        }
        Some(Control::ScriptList) => {
            state.focus = PaneFocus::Scripts;
            if point_in_rect(layout.script_content, col, row) {
                state.script_list.begin_drag(layout.script_content, row);
                if is_double_click(state, Control::ScriptList) {
                    // A double-click runs the row; the drag that the first
                    // press started is abandoned by the execute path.
                    state.script_list.end_drag((col, row));
                    state.last_click = None;
                    execute_selected_script(state);
                } else {
                    remember_click(state, Control::ScriptList);
                }
            }
        }
        Some(Control::ImportButton) => open_import_prompt(state),
        Some(Control::AddCategoryButton) => open_add_category_prompt(state),
        _ => {}
    }
}

fn handle_right_press(state: &mut AppState, layout: &AppLayout, col: u16, row: u16) {
    match layout.control_at(col, row) {
        Some(Control::CategoryList) => {
            if let Some(index) = state.category_list.nearest_row(layout.category_content, row) {
                state.category_list.select(index);
                sync_category_selection(state);
                state.overlay = Overlay::CategoryMenu {
                    anchor: (col, row),
                    selected: 0,
                };
            }
        }
        Some(Control::ScriptList) => {
            if let Some(index) = state.script_list.nearest_row(layout.script_content, row) {
                state.script_list.select(index);
                state.focus = PaneFocus::Scripts;
                state.overlay = Overlay::ScriptMenu {
                    anchor: (col, row),
                    selected: 0,
                };
            }
        }
        _ => {}
    }
}

fn handle_drag_motion(state: &mut AppState, layout: &AppLayout, col: u16, row: u16) {
    if state.dragging_sash {
        state.config.sash_position = clamp_sash(state.terminal_area, col);
        return;
    }

    // Reordering only happens while the pointer stays over the dragging
    // list; outside its bounds the drag survives but is suppressed.
    if state.category_list.is_dragging() && point_in_rect(layout.category_content, col, row) {
        state.category_list.drag_over(layout.category_content, row);
        sync_category_selection(state);
    }
    if state.script_list.is_dragging() && point_in_rect(layout.script_content, col, row) {
        state.script_list.drag_over(layout.script_content, row);
    }
}

fn handle_release(state: &mut AppState, layout: &AppLayout, col: u16, row: u16) {
    if state.dragging_sash {
        state.dragging_sash = false;
        state.save();
        return;
    }

    let target = layout.control_at(col, row);
    if let Some(report) = state.category_list.end_drag((col, row)) {
        on_category_drop(state, report);
    } else if let Some(report) = state.script_list.end_drag((col, row)) {
        on_script_drop(state, layout, report, target);
    }
}

fn handle_menu_mouse(
    state: &mut AppState,
    mouse: MouseEvent,
    anchor: (u16, u16),
    items: &[&str],
    category_menu: bool,
) {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        let hit = MenuPopup::item_at(anchor, items, state.terminal_area, mouse.column, mouse.row);
        state.overlay = Overlay::None;
        if let Some(index) = hit {
            activate_menu_item(state, index, category_menu);
        }
    }
}

// ── drop handling ───────────────────────────────────────────────

/// Category pane drop: regardless of target, rebuild the mapping in the
/// displayed key order, each category keeping its script list.
fn on_category_drop(state: &mut AppState, _report: DropReport) {
    let order: Vec<String> = state.category_list.rows().to_vec();
    state.config.categories.reorder_categories(order.iter());
    state.render_categories();
    state.save();
}

/// Script pane drop: a release over the category pane is a transfer to the
/// category nearest the release point; anywhere else confirms the displayed
/// order as the stored order.
fn on_script_drop(
    state: &mut AppState,
    layout: &AppLayout,
    report: DropReport,
    target: Option<Control>,
) {
    let Some(selected) = state.selected_category.clone() else {
        return;
    };

    // Motion inside the pane may already have shuffled the rows; commit the
    // displayed order first so `report.origin` indexes the stored list.
    let order: Vec<String> = state.script_list.rows().to_vec();
    if let Err(e) = state.config.categories.set_script_order(&selected, order) {
        state.set_status(e.to_string());
        return;
    }

    if target == Some(Control::CategoryList) {
        let Some(target_row) = state
            .category_list
            .nearest_row(layout.category_content, report.release.1)
        else {
            return;
        };
        let Some(target_name) = state.config.categories.name_at(target_row).map(str::to_string)
        else {
            return;
        };

        match state
            .config
            .categories
            .transfer_script(&selected, report.origin, &target_name)
        {
            Ok(script) => {
                tracing::info!("{} moved to {target_name}", script.display());
                state.save();
                state.render_scripts();
                state.notify("Script Moved", format!("Script moved to {target_name}"));
            }
            Err(e) => state.set_status(e.to_string()),
        }
    } else {
        // Pure reorder — the committed order is the result.
        state.save();
    }
}

// ── controller operations ───────────────────────────────────────

/// Make the category under the selection bar the active one.  Resolved from
/// the displayed rows, not the store: mid-drag the projection is shuffled
/// ahead of the store and the bar follows the dragged row.
fn sync_category_selection(state: &mut AppState) {
    let Some(index) = state.category_list.selected else {
        return;
    };
    if let Some(name) = state.category_list.rows().get(index).cloned() {
        if state.selected_category.as_deref() != Some(name.as_str()) {
            state.selected_category = Some(name);
            state.render_scripts();
        }
    }
}

fn open_add_category_prompt(state: &mut AppState) {
    state.input.clear();
    state.overlay = Overlay::AddCategoryPrompt;
}

fn open_import_prompt(state: &mut AppState) {
    if state.selected_category.is_none() {
        state.set_status("No category selected");
        return;
    }
    state.input.clear();
    state.overlay = Overlay::ImportPrompt;
}

fn confirm_add_category(state: &mut AppState, input: String) {
    let name = input.trim();
    match state.config.categories.add_category(name) {
        Ok(()) => {
            tracing::info!("Add Category: {name}");
            state.render_categories();
            state.save();
            // First category ever — select it so imports have a home.
            if state.selected_category.is_none() {
                state.reset_selection();
            }
        }
        Err(e) => state.warn("Warning", e.to_string()),
    }
}

/// Expand the import prompt's input: a glob pattern or a single path,
/// filtered to the script types the deck launches.
fn expand_import(input: &str) -> Vec<PathBuf> {
    let pattern = input.trim();
    if pattern.is_empty() {
        return Vec::new();
    }

    let candidates: Vec<PathBuf> = if pattern.contains(['*', '?', '[']) {
        match glob::glob(pattern) {
            Ok(paths) => paths.flatten().collect(),
            Err(_) => Vec::new(),
        }
    } else {
        vec![PathBuf::from(pattern)]
    };

    candidates
        .into_iter()
        .filter(|p| is_supported_script(p))
        .collect()
}

fn confirm_import(state: &mut AppState, input: String) {
    let Some(selected) = state.selected_category.clone() else {
        state.set_status("No category selected");
        return;
    };

    let scripts = expand_import(&input);
    if scripts.is_empty() {
        state.set_status("No matching .bat/.ps1 scripts");
        return;
    }

    for script in &scripts {
        tracing::info!("Add Script: {}", script.display());
    }
    let count = scripts.len();
    if state
        .config
        .categories
        .add_scripts(&selected, scripts)
        .is_ok()
    {
        state.save();
        state.render_scripts();
        state.set_status(format!("Imported {count} script(s)"));
    }
}

fn request_delete_category(state: &mut AppState) {
    let Some(index) = state.category_list.selected else {
        // Console-style message, not a dialog — kept as the original
        // behaved, even though other paths warn with a popup.
        state.set_status("No category selected");
        return;
    };
    let Some(name) = state.config.categories.name_at(index).map(str::to_string) else {
        state.set_status("No category selected");
        return;
    };
    state.overlay = Overlay::ConfirmDeleteCategory { name };
}

fn delete_category(state: &mut AppState, name: &str) {
    if state.config.categories.delete_category(name).is_err() {
        return;
    }
    tracing::info!("Delete Category: {name}");
    state.save();
    if state.selected_category.as_deref() == Some(name) {
        state.reset_selection();
    } else {
        state.render_categories();
    }
}

fn request_delete_script(state: &mut AppState) {
    if state.selected_category.is_none() {
        state.set_status("No category selected");
        return;
    }
    let Some(index) = state.script_list.selected else {
        state.set_status("No script selected");
        return;
    };
    let Some(label) = state.script_list.rows().get(index).cloned() else {
        return;
    };
    state.overlay = Overlay::ConfirmDeleteScript { index, label };
}

fn delete_script(state: &mut AppState, index: usize) {
    let Some(selected) = state.selected_category.clone() else {
        return;
    };
    match state.config.categories.remove_script(&selected, index) {
        Ok(script) => {
            tracing::info!("Delete Script: {}", script.display());
            state.save();
            state.render_scripts();
        }
        Err(e) => state.set_status(e.to_string()),
    }
}

fn selected_script_path(state: &AppState) -> Option<PathBuf> {
    let selected = state.selected_category.as_deref()?;
    let index = state.script_list.selected?;
    state
        .config
        .categories
        .scripts_of(selected)
        .get(index)
        .cloned()
}

fn execute_selected_script(state: &mut AppState) {
    let Some(path) = selected_script_path(state) else {
        return;
    };
    if let Err(e) = launch::run_script(&path) {
        state.set_status(format!("Launch failed: {e}"));
    }
}

fn open_selected_in_editor(state: &mut AppState) {
    let Some(path) = selected_script_path(state) else {
        return;
    };
    let editor = state.config.editor.clone();
    if let Err(e) = launch::open_in_editor(&editor, &path) {
        state.set_status(format!("Editor failed: {e}"));
    }
}

// ── click bookkeeping ───────────────────────────────────────────

fn remember_click(state: &mut AppState, control: Control) {
    let index = match control {
        Control::CategoryList => state.category_list.selected,
        Control::ScriptList => state.script_list.selected,
        _ => None,
    };
    if let Some(index) = index {
        state.last_click = Some((control, index, Instant::now()));
    }
}

fn is_double_click(state: &AppState, control: Control) -> bool {
    let current = match control {
        Control::CategoryList => state.category_list.selected,
        Control::ScriptList => state.script_list.selected,
        _ => None,
    };
    match (&state.last_click, current) {
        (Some((last_control, last_index, at)), Some(index)) => {
            *last_control == control
                && *last_index == index
                && at.elapsed().as_millis() as u64 <= DOUBLE_CLICK_MS
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, col: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// State with categories `General: [a.bat]`, `Tools: []`, saving into a
    /// temp dir, on an 80x24 terminal with the sash at 20.
    fn fixture(dir: &tempfile::TempDir) -> AppState {
        let mut config = AppConfig {
            categories: crate::core::store::CategoryStore::new(),
            ..AppConfig::default()
        };
        config.categories.add_category("General").unwrap();
        config.categories.add_scripts("General", ["a.bat"]).unwrap();
        config.categories.add_category("Tools").unwrap();

        let mut state = AppState::new(config, dir.path().join("config.json"));
        state.terminal_area = Rect::new(0, 0, 80, 24);
        state
    }

    fn layout(state: &AppState) -> AppLayout {
        AppLayout::from_area(state.terminal_area, state.config.sash_position)
    }

    #[test]
    fn startup_selects_first_category_and_projects_scripts() {
        let dir = tempfile::tempdir().unwrap();
        let state = fixture(&dir);
        assert_eq!(state.selected_category.as_deref(), Some("General"));
        assert_eq!(state.category_list.rows(), &["General", "Tools"]);
        assert_eq!(state.script_list.rows(), &["a.bat"]);
    }

    #[test]
    fn clicking_a_category_row_reprojects_the_script_pane() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fixture(&dir);
        let l = layout(&state);

        // Second category row is one below the top of the pane content.
        let row = l.category_content.y + 1;
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 3, row));
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 3, row));

        assert_eq!(state.selected_category.as_deref(), Some("Tools"));
        assert!(state.script_list.is_empty());
    }

    #[test]
    fn dragging_a_script_onto_a_category_row_transfers_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fixture(&dir);
        let l = layout(&state);

        let script_col = l.script_content.x + 2;
        let script_row = l.script_content.y; // row of "a.bat"
        let tools_row = l.category_content.y + 1; // row of "Tools"
        let category_col = l.category_content.x + 2;

        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Down(MouseButton::Left), script_col, script_row),
        );
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Drag(MouseButton::Left), category_col, tools_row),
        );
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Up(MouseButton::Left), category_col, tools_row),
        );

        assert!(state.config.categories.scripts_of("General").is_empty());
        assert_eq!(
            state.config.categories.scripts_of("Tools"),
            &[PathBuf::from("a.bat")]
        );
        // Source pane re-rendered, user notified of the move.
        assert!(state.script_list.is_empty());
        assert!(matches!(state.overlay, Overlay::Notice { .. }));
        // Mutation hit the disk.
        let persisted = AppConfig::load(&state.config_path);
        assert_eq!(
            persisted.categories.scripts_of("Tools"),
            &[PathBuf::from("a.bat")]
        );
    }

    #[test]
    fn intra_list_drag_confirms_displayed_order_into_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fixture(&dir);
        state
            .config
            .categories
            .add_scripts("General", ["b.bat", "c.ps1"])
            .unwrap();
        state.render_scripts();
        let l = layout(&state);

        let col = l.script_content.x + 2;
        let top = l.script_content.y;

        // Grab "a.bat" and carry it to the bottom, releasing inside the pane.
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), col, top));
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), col, top + 1));
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), col, top + 2));
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), col, top + 2));

        assert_eq!(
            state.config.categories.scripts_of("General"),
            &[
                PathBuf::from("b.bat"),
                PathBuf::from("c.ps1"),
                PathBuf::from("a.bat")
            ]
        );
    }

    #[test]
    fn category_drag_rebuilds_mapping_in_displayed_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fixture(&dir);
        let l = layout(&state);

        let col = l.category_content.x + 2;
        let top = l.category_content.y;

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), col, top));
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), col, top + 1));
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), col, top + 1));

        assert_eq!(state.config.categories.names(), vec!["Tools", "General"]);
        assert_eq!(
            state.config.categories.scripts_of("General"),
            &[PathBuf::from("a.bat")]
        );
    }

    #[test]
    fn adding_a_duplicate_category_warns_and_leaves_rows_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fixture(&dir);

        handle_key(&mut state, key(KeyCode::Char('a')));
        assert_eq!(state.overlay, Overlay::AddCategoryPrompt);
        for c in "General".chars() {
            handle_key(&mut state, key(KeyCode::Char(c)));
        }
        handle_key(&mut state, key(KeyCode::Enter));

        assert!(matches!(state.overlay, Overlay::Notice { warning: true, .. }));
        assert_eq!(state.category_list.rows(), &["General", "Tools"]);
        assert_eq!(state.config.categories.len(), 2);
    }

    #[test]
    fn adding_a_category_persists_both_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fixture(&dir);
        state.config.categories.delete_category("Tools").unwrap();
        state.render_categories();

        handle_key(&mut state, key(KeyCode::Char('a')));
        for c in "Tools".chars() {
            handle_key(&mut state, key(KeyCode::Char(c)));
        }
        handle_key(&mut state, key(KeyCode::Enter));

        assert_eq!(state.config.categories.names(), vec!["General", "Tools"]);
        let persisted = AppConfig::load(&state.config_path);
        assert_eq!(persisted.categories.names(), vec!["General", "Tools"]);
        assert!(persisted.categories.scripts_of("Tools").is_empty());
    }

    #[test]
    fn deleting_the_last_category_clears_scripts_and_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fixture(&dir);
        state.config.categories.delete_category("Tools").unwrap();
        state.render_categories();

        handle_key(&mut state, key(KeyCode::Char('d')));
        assert!(matches!(
            state.overlay,
            Overlay::ConfirmDeleteCategory { .. }
        ));
        handle_key(&mut state, key(KeyCode::Char('y')));

        assert!(state.config.categories.is_empty());
        assert_eq!(state.selected_category, None);
        assert!(state.script_list.is_empty());
        assert!(state.category_list.is_empty());
    }

    #[test]
    fn deleting_a_category_selects_the_first_remaining_one() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fixture(&dir);

        // Select and delete "Tools" second in the list.
        state.category_list.select(1);
        sync_category_selection(&mut state);
        handle_key(&mut state, key(KeyCode::Char('d')));
        handle_key(&mut state, key(KeyCode::Enter));

        assert_eq!(state.config.categories.names(), vec!["General"]);
        assert_eq!(state.selected_category.as_deref(), Some("General"));
        assert_eq!(state.script_list.rows(), &["a.bat"]);
    }

    #[test]
    fn declining_a_confirmation_mutates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fixture(&dir);

        handle_key(&mut state, key(KeyCode::Char('d')));
        handle_key(&mut state, key(KeyCode::Char('n')));

        assert_eq!(state.config.categories.len(), 2);
        assert_eq!(state.overlay, Overlay::None);
    }

    #[test]
    fn delete_script_without_category_reports_in_status_bar_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fixture(&dir);
        state.config.categories.delete_category("General").unwrap();
        state.config.categories.delete_category("Tools").unwrap();
        state.reset_selection();
        state.focus = PaneFocus::Scripts;

        handle_key(&mut state, key(KeyCode::Char('d')));

        assert_eq!(state.overlay, Overlay::None);
        assert!(state
            .status_message
            .as_ref()
            .is_some_and(|(m, _)| m == "No category selected"));
    }

    #[test]
    fn deleting_a_script_removes_the_indexed_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fixture(&dir);
        state
            .config
            .categories
            .add_scripts("General", ["b.bat"])
            .unwrap();
        state.render_scripts();
        state.focus = PaneFocus::Scripts;
        state.script_list.select(0);

        handle_key(&mut state, key(KeyCode::Char('d')));
        assert!(matches!(state.overlay, Overlay::ConfirmDeleteScript { .. }));
        handle_key(&mut state, key(KeyCode::Char('y')));

        assert_eq!(
            state.config.categories.scripts_of("General"),
            &[PathBuf::from("b.bat")]
        );
        assert_eq!(state.script_list.rows(), &["b.bat"]);
    }

    #[test]
    fn import_filters_unsupported_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("x.bat"), "").unwrap();
        std::fs::write(dir.path().join("y.ps1"), "").unwrap();
        std::fs::write(dir.path().join("z.sh"), "").unwrap();

        let paths = expand_import(&format!("{}/*", dir.path().display()));
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| is_supported_script(p)));
    }

    #[test]
    fn import_appends_to_the_selected_category() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("job.bat");
        std::fs::write(&script, "").unwrap();
        let mut state = fixture(&dir);

        handle_key(&mut state, key(KeyCode::Char('i')));
        assert_eq!(state.overlay, Overlay::ImportPrompt);
        for c in script.display().to_string().chars() {
            handle_key(&mut state, key(KeyCode::Char(c)));
        }
        handle_key(&mut state, key(KeyCode::Enter));

        assert_eq!(
            state.config.categories.scripts_of("General"),
            &[PathBuf::from("a.bat"), script]
        );
        assert_eq!(state.script_list.len(), 2);
    }

    #[test]
    fn sash_drag_is_clamped_and_persisted_on_release() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fixture(&dir);
        let l = layout(&state);
        let sash_row = l.sash_area.y + 2;

        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Down(MouseButton::Left), l.sash_area.x, sash_row),
        );
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 40, sash_row));
        assert_eq!(state.config.sash_position, 40);

        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 2, sash_row));
        assert_eq!(state.config.sash_position, crate::config::MIN_SASH);

        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 2, sash_row));
        let persisted = AppConfig::load(&state.config_path);
        assert_eq!(persisted.sash_position, crate::config::MIN_SASH);
    }

    #[test]
    fn right_click_on_a_script_row_opens_its_menu() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fixture(&dir);
        let l = layout(&state);

        handle_mouse(
            &mut state,
            mouse(
                MouseEventKind::Down(MouseButton::Right),
                l.script_content.x + 1,
                l.script_content.y,
            ),
        );
        assert!(matches!(state.overlay, Overlay::ScriptMenu { .. }));
        assert_eq!(state.script_list.selected, Some(0));
    }
}
