//! Sidebar view
//!
//! Shows the active tenant, the view switcher and who is logged in

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::display::truncate;
use crate::tui::app::{ActiveView, App, FocusedPanel};
use crate::tui::layout::SidebarLayout;

/// Render the sidebar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = SidebarLayout::new(area);

    render_header(frame, app, layout.header);
    render_view_switcher(frame, app, layout.view_switcher);
    render_session(frame, app, layout.session);
}

/// Render sidebar header
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" budgetdash ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let tenant = if app.tenants_loading && app.session.tenant_id().is_none() {
        "Loading tenants...".to_string()
    } else {
        truncate(&app.tenant_label(), area.width.saturating_sub(4) as usize)
    };

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            tenant,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "t:Switch tenant",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(block);

    frame.render_widget(text, area);
}

/// Render view switcher
fn render_view_switcher(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focused_panel == FocusedPanel::Sidebar;
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Views ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let items: Vec<ListItem> = ActiveView::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let style = if app.active_view == *view {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let indicator = if app.active_view == *view { "▶" } else { " " };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", indicator), style),
                Span::styled(format!("[{}] ", i + 1), Style::default().fg(Color::Yellow)),
                Span::styled(view.title(), style),
            ]))
        })
        .collect();

    let mut list = List::new(items).block(block);
    let mut state = ListState::default();
    if is_focused {
        list = list.highlight_style(Style::default().bg(Color::DarkGray));
        state.select(Some(app.active_view.index()));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the logged-in user and selected month
fn render_session(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Session ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let width = area.width.saturating_sub(4) as usize;
    let user = app
        .session
        .user()
        .map(|u| truncate(&u.name, width))
        .unwrap_or_else(|| "Not logged in".to_string());
    let email = app
        .session
        .user()
        .map(|u| truncate(&u.email, width))
        .unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(Span::styled(user, Style::default().fg(Color::White))),
        Line::from(Span::styled(email, Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            app.period().label(),
            Style::default().fg(Color::Cyan),
        )),
    ])
    .block(block);

    frame.render_widget(text, area);
}
