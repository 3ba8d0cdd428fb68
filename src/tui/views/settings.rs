//! Settings view
//!
//! Dashboard toggles and log out.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::session::Toggle;
use crate::tui::app::App;
use crate::tui::layout::MainPanelLayout;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = MainPanelLayout::new(area);

    let header_block = Block::default()
        .title(" Settings ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(format!("Endpoint: {}", app.settings.endpoint))
            .block(header_block)
            .style(Style::default().fg(Color::DarkGray)),
        layout.header,
    );

    let prefs = &app.session.preferences;
    let mut items: Vec<ListItem> = Toggle::ALL
        .iter()
        .map(|toggle| {
            let enabled = prefs.is_enabled(*toggle);
            let (mark, color) = if enabled {
                ("[x]", Color::Green)
            } else {
                ("[ ]", Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", mark), Style::default().fg(color)),
                Span::styled(
                    format!("{:<24}", toggle.label()),
                    Style::default().fg(Color::White),
                ),
                Span::styled(toggle.description(), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let who = app
        .session
        .user()
        .map(|u| format!(" ({})", u.email))
        .unwrap_or_default();
    items.push(ListItem::new(Line::from(vec![
        Span::styled("    Log out", Style::default().fg(Color::Red)),
        Span::styled(who, Style::default().fg(Color::DarkGray)),
    ])));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected_setting_index));
    frame.render_stateful_widget(list, layout.content, &mut state);
}
