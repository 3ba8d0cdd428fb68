//! Help dialog
//!
//! Shows contextual keyboard shortcuts

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app.active_view))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn section(title: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title.to_string(),
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

/// Help lines for the global keys plus the active view
fn help_lines(view: ActiveView) -> Vec<Line<'static>> {
    let mut lines = vec![
        section("Global Keys"),
        Line::from(""),
        key_line("q", "Quit application"),
        key_line("?", "Show/hide help"),
        key_line("1-5", "Switch view"),
        key_line("Tab", "Switch panel focus"),
        key_line("[ / ]", "Previous / next month"),
        key_line("t", "Switch tenant"),
        key_line("R", "Reload all data"),
        key_line("x", "Dismiss notification"),
        Line::from(""),
    ];

    lines.push(section(view.title()));
    lines.push(Line::from(""));
    match view {
        ActiveView::Overview => {
            lines.push(key_line("b", "Toggle budget vs. actual chart"));
            lines.push(key_line("c", "Toggle category breakdown"));
            lines.push(key_line("s", "Toggle savings goals"));
        }
        ActiveView::Transactions => {
            lines.push(key_line("j/k", "Move selection"));
            lines.push(key_line("PgUp/PgDn", "Move one screen"));
            lines.push(key_line("g/G", "Go to top / bottom"));
            lines.push(key_line("e/Enter", "Reclassify transaction"));
            lines.push(key_line("f or /", "Filter transactions"));
            lines.push(key_line("F", "Clear filters"));
            lines.push(key_line("n", "Load more"));
            lines.push(key_line("r", "Refresh"));
        }
        ActiveView::Goals => {
            lines.push(key_line("j/k", "Select goal"));
        }
        ActiveView::Report => {
            lines.push(Line::from(
                "Spending by category over the transactions loaded so far.",
            ));
            lines.push(key_line("n", "Load more transactions"));
        }
        ActiveView::Settings => {
            lines.push(key_line("j/k", "Move selection"));
            lines.push(key_line("Enter/Space", "Toggle setting or log out"));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "Press Esc to close",
        Style::default().fg(Color::DarkGray),
    )]));

    lines
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
