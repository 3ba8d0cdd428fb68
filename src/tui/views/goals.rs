//! Savings goals view
//!
//! Goal list with progress on the left, the selected goal's detail and
//! history sparkline on the right.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Sparkline},
    Frame,
};

use crate::display::truncate;
use crate::models::SavingsGoal;
use crate::services::goals::{history_values, is_reached, progress_percent};
use crate::tui::app::{App, FocusedPanel, Loadable};

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let border_color = if app.focused_panel == FocusedPanel::Main {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" Savings Goals ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let goals = match &app.goals {
        Loadable::Loaded(goals) if !goals.is_empty() => goals,
        state => {
            let (text, color) = match state {
                Loadable::Loading => ("Loading savings goals…".to_string(), Color::Yellow),
                Loadable::Failed(message) => (message.clone(), Color::Red),
                Loadable::Loaded(_) => ("No savings goals yet.".to_string(), Color::DarkGray),
                Loadable::Idle => ("No tenant selected.".to_string(), Color::DarkGray),
            };
            frame.render_widget(
                Paragraph::new(text)
                    .block(block)
                    .style(Style::default().fg(color)),
                area,
            );
            return;
        }
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(inner);

    let currency = app.settings.default_currency.as_str();
    let selected = app.selected_goal_index.min(goals.len() - 1);
    render_list(frame, goals, selected, columns[0]);
    render_detail(frame, &goals[selected], currency, columns[1]);
}

fn render_list(frame: &mut Frame, goals: &[SavingsGoal], selected: usize, area: Rect) {
    let width = area.width.saturating_sub(10) as usize;
    let items: Vec<ListItem> = goals
        .iter()
        .map(|goal| {
            let percent = progress_percent(goal);
            let color = if is_reached(goal) {
                Color::Green
            } else {
                Color::White
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<width$}", truncate(&goal.name, width), width = width),
                    Style::default().fg(color),
                ),
                Span::styled(format!("{:>4}%", percent), Style::default().fg(Color::Cyan)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::RIGHT))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_detail(frame: &mut Frame, goal: &SavingsGoal, currency: &str, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(1)
        .constraints([
            Constraint::Length(4), // Figures
            Constraint::Length(1), // Gauge
            Constraint::Length(1),
            Constraint::Min(3), // History
        ])
        .split(area);

    let figures = Paragraph::new(vec![
        Line::from(Span::styled(
            goal.name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Saved {} of {}",
            goal.current.format_with_code(currency),
            goal.target.format_with_code(currency)
        )),
        Line::from(format!(
            "Remaining {}",
            goal.remaining().format_with_code(currency)
        )),
        Line::from(Span::styled(
            format!("Deadline: {}", goal.deadline_label()),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(figures, chunks[0]);

    let percent = progress_percent(goal);
    let gauge_color = if is_reached(goal) {
        Color::Green
    } else {
        Color::Cyan
    };
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(gauge_color).bg(Color::Black))
            .percent(percent),
        chunks[1],
    );

    let history = history_values(goal);
    let block = Block::default()
        .title(" History ")
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    if history.is_empty() {
        frame.render_widget(
            Paragraph::new("No history recorded.")
                .block(block)
                .style(Style::default().fg(Color::DarkGray)),
            chunks[3],
        );
        return;
    }

    let sparkline = Sparkline::default()
        .block(block)
        .data(&history)
        .style(Style::default().fg(Color::Green));
    frame.render_widget(sparkline, chunks[3]);
}
