//! TUI Views module
//!
//! Contains the screens (connecting, unavailable, login, dashboard) and the
//! dashboard views: overview, transactions, goals, report and settings, as
//! well as the sidebar and status bar.

pub mod goals;
pub mod login;
pub mod overview;
pub mod report;
pub mod settings;
pub mod sidebar;
pub mod status_bar;
pub mod transactions;

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{ActiveDialog, ActiveView, App, Screen};
use super::dialogs;
use super::layout::{centered_rect_fixed, AppLayout};
use super::widgets::{error_dialog_area, notification_area, ErrorDialog, NotificationWidget};

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    match &app.screen {
        Screen::Connecting => render_connecting(frame, app),
        Screen::Unavailable(info) => {
            let area = error_dialog_area(frame.area());
            frame.render_widget(ErrorDialog::new(info).hint("r:Retry  q:Quit"), area);
        }
        Screen::Login => login::render(frame, app),
        Screen::Dashboard => render_dashboard(frame, app),
    }

    if let Some(notification) = app.notifications.current() {
        let area = notification_area(frame.area());
        frame.render_widget(NotificationWidget::new(notification), area);
    }
}

fn render_connecting(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(50, 5, frame.area());
    let block = Block::default()
        .title(" budgetdash ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let text = Paragraph::new(format!("Connecting to {}…", app.settings.endpoint))
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

fn render_dashboard(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    sidebar::render(frame, app, layout.sidebar);

    match app.active_view {
        ActiveView::Overview => overview::render(frame, app, layout.main),
        ActiveView::Transactions => transactions::render(frame, app, layout.main),
        ActiveView::Goals => goals::render(frame, app, layout.main),
        ActiveView::Report => report::render(frame, app, layout.main),
        ActiveView::Settings => settings::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &mut App) {
    match app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::Reclassify => dialogs::reclassify::render(frame, app),
        ActiveDialog::Filter => dialogs::filter::render(frame, app),
        ActiveDialog::Tenant => dialogs::tenant::render(frame, app),
        ActiveDialog::None => {}
    }
}
