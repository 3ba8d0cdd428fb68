//! Event handler for the TUI
//!
//! Routes keyboard and mouse events to the appropriate handlers
//! based on the current screen, dialog and view.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use super::app::{ActiveDialog, ActiveView, App, FocusedPanel, Screen, SETTINGS_ROWS};
use super::event::Event;
use super::views::login::LoginField;
use super::widgets::TextInput;
use crate::session::Toggle;

/// Rows moved per mouse wheel notch
const SCROLL_STEP: isize = 3;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => {
            handle_mouse_event(app, mouse);
            Ok(())
        }
        Event::Fetched(reply) => {
            app.apply_reply(reply);
            Ok(())
        }
        Event::Tick => {
            app.on_tick();
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    match app.screen {
        Screen::Connecting => {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                app.quit();
            }
            Ok(())
        }
        Screen::Unavailable(_) => {
            match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => app.retry_health(),
                KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                _ => {}
            }
            Ok(())
        }
        Screen::Login => handle_login_key(app, key),
        Screen::Dashboard => {
            if app.has_dialog() {
                handle_dialog_key(app, key)
            } else {
                handle_normal_key(app, key)
            }
        }
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if app.screen != Screen::Dashboard
        || app.has_dialog()
        || app.active_view != ActiveView::Transactions
    {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollDown => app.move_transaction_selection(SCROLL_STEP),
        MouseEventKind::ScrollUp => app.move_transaction_selection(-SCROLL_STEP),
        _ => {}
    }
}

/// Shared line-editing keys. Returns false when the key was not an edit.
fn edit_input(input: &mut TextInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => input.clear(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_start(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}

/// Handle keys on the login screen
fn handle_login_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Enter => app.submit_login(),
        KeyCode::Tab | KeyCode::Down => app.login_form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.login_form.prev_field(),
        _ if app.login_form.focused_field == LoginField::Tenant => match key.code {
            KeyCode::Left => app.login_form.cycle_tenant(false),
            KeyCode::Right | KeyCode::Char(' ') => app.login_form.cycle_tenant(true),
            _ => {}
        },
        _ => {
            let form = &mut app.login_form;
            if let Some(input) = form.focused_input_mut() {
                if edit_input(input, key) {
                    form.error = None;
                }
            }
        }
    }
    Ok(())
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    // Global keys (work in every view)
    match key.code {
        KeyCode::Char('q') => {
            app.quit();
            return Ok(());
        }
        KeyCode::Char('?') => {
            app.open_dialog(ActiveDialog::Help);
            return Ok(());
        }
        KeyCode::Tab => {
            app.toggle_panel_focus();
            return Ok(());
        }
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            app.switch_view(ActiveView::ALL[index]);
            return Ok(());
        }
        KeyCode::Char('[') => {
            app.shift_period(false);
            return Ok(());
        }
        KeyCode::Char(']') => {
            app.shift_period(true);
            return Ok(());
        }
        KeyCode::Char('t') => {
            app.open_dialog(ActiveDialog::Tenant);
            return Ok(());
        }
        KeyCode::Char('R') => {
            app.reload_data();
            app.set_status("Reloading…");
            return Ok(());
        }
        KeyCode::Char('x') => {
            app.notifications.dismiss();
            return Ok(());
        }
        _ => {}
    }

    match app.focused_panel {
        FocusedPanel::Sidebar => handle_sidebar_key(app, key),
        FocusedPanel::Main => handle_main_panel_key(app, key),
    }
}

/// Handle keys when sidebar is focused
fn handle_sidebar_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.next_view(),
        KeyCode::Char('k') | KeyCode::Up => app.prev_view(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            app.focused_panel = FocusedPanel::Main;
        }
        _ => {}
    }
    Ok(())
}

/// Handle keys when main panel is focused
fn handle_main_panel_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.active_view {
        ActiveView::Overview => handle_overview_key(app, key),
        ActiveView::Transactions => handle_transactions_key(app, key),
        ActiveView::Goals => handle_goals_key(app, key),
        ActiveView::Report => handle_report_key(app, key),
        ActiveView::Settings => handle_settings_key(app, key),
    }
    Ok(())
}

fn handle_overview_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('b') => app.toggle_preference(Toggle::BudgetVsActual),
        KeyCode::Char('c') => app.toggle_preference(Toggle::CategoryBreakdown),
        KeyCode::Char('s') => app.toggle_preference(Toggle::SavingsGoals),
        _ => {}
    }
}

fn handle_transactions_key(app: &mut App, key: KeyEvent) {
    let page = app.list.visible_rows() as isize;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_transaction_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_transaction_selection(-1),
        KeyCode::PageDown => app.move_transaction_selection(page),
        KeyCode::PageUp => app.move_transaction_selection(-page),
        KeyCode::Char('g') | KeyCode::Home => {
            app.selected_transaction_index = 0;
            app.sync_list();
        }
        KeyCode::Char('G') | KeyCode::End => app.select_last_transaction(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_dialog(ActiveDialog::Reclassify),
        KeyCode::Char('f') | KeyCode::Char('/') => app.open_dialog(ActiveDialog::Filter),
        KeyCode::Char('F') => app.clear_filters(),
        KeyCode::Char('n') => app.load_more(),
        KeyCode::Char('r') => app.refresh_transactions(),
        _ => {}
    }
}

fn handle_goals_key(app: &mut App, key: KeyEvent) {
    let count = app.goals.loaded().map(|g| g.len()).unwrap_or(0);
    if count == 0 {
        return;
    }
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.selected_goal_index = (app.selected_goal_index + 1).min(count - 1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.selected_goal_index = app.selected_goal_index.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_report_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('n') {
        app.load_more();
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.selected_setting_index = (app.selected_setting_index + 1).min(SETTINGS_ROWS - 1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.selected_setting_index = app.selected_setting_index.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_setting(),
        _ => {}
    }
}

/// Handle keys when a dialog is open
fn handle_dialog_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.active_dialog {
        ActiveDialog::Help => {
            // Close help on any key
            app.close_dialog();
        }
        ActiveDialog::Reclassify => match key.code {
            KeyCode::Esc => app.close_dialog(),
            KeyCode::Enter => app.submit_reclassify(),
            _ => {
                if edit_input(&mut app.reclassify_state.input, key) {
                    app.reclassify_state.error = None;
                }
            }
        },
        ActiveDialog::Filter => match key.code {
            KeyCode::Esc => app.close_dialog(),
            KeyCode::Enter => {
                let filters = app.filter_form.apply_to(app.feed.filters());
                app.close_dialog();
                app.apply_filters(filters);
            }
            KeyCode::Tab | KeyCode::Down => app.filter_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => app.filter_form.prev_field(),
            _ => {
                edit_input(app.filter_form.focused_input_mut(), key);
            }
        },
        ActiveDialog::Tenant => {
            let count = app.session.tenant.tenants().len();
            match key.code {
                KeyCode::Esc => app.close_dialog(),
                KeyCode::Char('j') | KeyCode::Down => {
                    app.selected_tenant_index =
                        (app.selected_tenant_index + 1).min(count.saturating_sub(1));
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    app.selected_tenant_index = app.selected_tenant_index.saturating_sub(1);
                }
                KeyCode::Enter => {
                    let index = app.selected_tenant_index;
                    app.close_dialog();
                    app.select_tenant(index);
                }
                _ => {}
            }
        }
        ActiveDialog::None => {}
    }
    Ok(())
}
