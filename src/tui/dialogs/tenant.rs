//! Tenant switcher dialog

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

pub fn render(frame: &mut Frame, app: &mut App) {
    let tenants = app.session.tenant.tenants();
    let height = (tenants.len() as u16 + 4).min(20);
    let area = centered_rect_fixed(44, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Switch Tenant ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .title_bottom(Line::from(" Enter:Select  Esc:Cancel ").centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let active = app.session.tenant_id();
    let items: Vec<ListItem> = tenants
        .iter()
        .map(|tenant| {
            let marker = if Some(&tenant.id) == active { "*" } else { " " };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), Style::default().fg(Color::Green)),
                Span::styled(tenant.name.clone(), Style::default().fg(Color::White)),
                Span::styled(
                    format!("  ({})", tenant.id),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected_tenant_index));
    frame.render_stateful_widget(list, area, &mut state);
}
