//! Status bar view
//!
//! Shows the period, tenant, background activity and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{ActiveView, App};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.period().label()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(app.tenant_label(), Style::default().fg(Color::White)),
    ];

    if is_busy(app) {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("Loading…", Style::default().fg(Color::Yellow)));
    }

    let pending = app.ledger.pending_count();
    if pending > 0 {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("Saving {} change(s)", pending),
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let hints = key_hints(app.active_view);

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.chars().count());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn is_busy(app: &App) -> bool {
    app.review.is_loading() || app.goals.is_loading() || app.feed.is_loading() || app.tenants_loading
}

fn key_hints(view: ActiveView) -> &'static str {
    match view {
        ActiveView::Transactions => " e:Reclassify  f:Filter  [ ]:Month  ?:Help  q:Quit ",
        ActiveView::Settings => " Enter:Toggle  ?:Help  q:Quit ",
        _ => " [ ]:Month  t:Tenant  ?:Help  q:Quit ",
    }
}
