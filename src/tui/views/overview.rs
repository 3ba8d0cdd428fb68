//! Overview view
//!
//! KPI tiles for the selected month plus the optional chart, category
//! breakdown and savings goal panels. Each panel shows its own loading or
//! failure state so one failed query never blanks the rest.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, Gauge, GraphType,
        Paragraph,
    },
    Frame,
};

use crate::models::{Money, MonthlyReview};
use crate::services::goals::progress_percent;
use crate::services::overview::{category_shares, cumulative_series, format_rate, OverviewKpis};
use crate::tui::app::{App, Loadable};
use crate::tui::layout::{MainPanelLayout, OverviewLayout};

/// Breakdown rows that fit before the rest are folded away
const MAX_BREAKDOWN_BARS: usize = 8;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let panel = MainPanelLayout::new(area);
    render_header(frame, app, panel.header);

    let prefs = &app.session.preferences;
    let layout = OverviewLayout::new(
        panel.content,
        prefs.show_budget_vs_actual,
        prefs.show_category_breakdown,
        prefs.show_savings_goals,
    );

    let currency = app.settings.default_currency.clone();
    match &app.review {
        Loadable::Loaded(review) => {
            render_kpis(frame, review, &currency, layout.kpis);
            if let Some(area) = layout.chart {
                render_chart(frame, review, area);
            }
            if let Some(area) = layout.breakdown {
                render_breakdown(frame, review, &currency, area);
            }
        }
        other => {
            let block = Block::default()
                .title(" This Month ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray));
            frame.render_widget(placeholder(other, "No data").block(block), layout.kpis);
            for (title, area) in [
                (" Budget vs. Actual ", layout.chart),
                (" Spending by Category ", layout.breakdown),
            ] {
                if let Some(area) = area {
                    let block = panel_block(title);
                    frame.render_widget(placeholder(other, "No data").block(block), area);
                }
            }
        }
    }

    if let Some(area) = layout.goals {
        render_goals(frame, app, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Overview: {} ", app.period().label()))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let hints = Paragraph::new("b:Chart  c:Categories  s:Goals  [ ]:Month")
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, area);
}

fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Text for a widget that has nothing to draw yet
fn placeholder<T>(state: &Loadable<T>, idle: &str) -> Paragraph<'static> {
    match state {
        Loadable::Loading => {
            Paragraph::new("Loading…").style(Style::default().fg(Color::Yellow))
        }
        Loadable::Failed(message) => {
            Paragraph::new(message.clone()).style(Style::default().fg(Color::Red))
        }
        Loadable::Idle | Loadable::Loaded(_) => {
            Paragraph::new(idle.to_string()).style(Style::default().fg(Color::DarkGray))
        }
    }
}

fn render_kpis(frame: &mut Frame, review: &MonthlyReview, currency: &str, area: Rect) {
    let kpis = OverviewKpis::from_review(review);
    let money = |m: Money| m.format_with_code(currency);

    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let balance_color = if kpis.available_balance.is_negative() {
        Color::Red
    } else {
        Color::Green
    };
    let spent_color = if kpis.is_over_budget() {
        Color::Red
    } else {
        Color::White
    };

    let entries = [
        (
            " Available Balance ",
            money(kpis.available_balance),
            format!("Income {}", money(kpis.income)),
            balance_color,
        ),
        (
            " Saved This Month ",
            money(kpis.savings.abs()),
            format!("{} of income", format_rate(kpis.savings_rate)),
            Color::Green,
        ),
        (
            " Budget Remaining ",
            money(kpis.budget_remaining),
            format!("Budget {}", money(kpis.budget)),
            Color::Cyan,
        ),
        (
            " Spent So Far ",
            money(kpis.actual.abs()),
            format!("{} of budget", format_rate(kpis.spending_rate)),
            spent_color,
        ),
    ];

    for ((title, value, detail, color), area) in entries.into_iter().zip(tiles.iter()) {
        let tile = Paragraph::new(vec![
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(detail, Style::default().fg(Color::DarkGray))),
        ])
        .block(panel_block(title));
        frame.render_widget(tile, *area);
    }
}

fn render_chart(frame: &mut Frame, review: &MonthlyReview, area: Rect) {
    let block = panel_block(" Budget vs. Actual (cumulative) ");
    let series = cumulative_series(&review.series);
    if series.is_empty() {
        frame.render_widget(
            Paragraph::new("No series data for this period.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let budget: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.budget.as_f64()))
        .collect();
    let actual: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.actual.as_f64()))
        .collect();

    let max_y = budget
        .iter()
        .chain(actual.iter())
        .map(|(_, y)| *y)
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let max_x = (series.len() - 1).max(1) as f64;

    let first = series.first().map(|p| p.date.clone()).unwrap_or_default();
    let last = series.last().map(|p| p.date.clone()).unwrap_or_default();

    let datasets = vec![
        Dataset::default()
            .name("Budget")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&budget),
        Dataset::default()
            .name("Actual")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&actual),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, max_x])
                .labels(vec![Span::raw(first), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, max_y])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", max_y / 2.0)),
                    Span::raw(format!("{:.0}", max_y)),
                ]),
        );

    frame.render_widget(chart, area);
}

fn render_breakdown(frame: &mut Frame, review: &MonthlyReview, currency: &str, area: Rect) {
    let block = panel_block(" Spending by Category ");
    let shares = category_shares(&review.category_breakdown);
    if shares.is_empty() {
        frame.render_widget(
            Paragraph::new("No spending recorded for this period.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let bars: Vec<Bar> = shares
        .iter()
        .take(MAX_BREAKDOWN_BARS)
        .map(|share| {
            Bar::default()
                .value(share.amount.units().max(0) as u64)
                .label(Line::from(share.name.clone()))
                .text_value(format!(
                    "{} ({:.0}%)",
                    share.amount.format_with_code(currency),
                    share.share * 100.0
                ))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .value_style(Style::default().fg(Color::White))
        .label_style(Style::default().fg(Color::White))
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

fn render_goals(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel_block(" Savings Goals ");
    let goals = match &app.goals {
        Loadable::Loaded(goals) if !goals.is_empty() => goals,
        Loadable::Loaded(_) => {
            frame.render_widget(
                Paragraph::new("No savings goals yet.")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                area,
            );
            return;
        }
        other => {
            frame.render_widget(placeholder(other, "No data").block(block), area);
            return;
        }
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = (inner.height as usize).max(1);
    let shown = goals.len().min(rows);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); shown])
        .split(inner);

    let currency = app.settings.default_currency.as_str();
    for (goal, row) in goals.iter().zip(chunks.iter()) {
        let percent = progress_percent(goal);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
            .percent(percent)
            .label(format!(
                "{}: {} / {} ({}%)",
                goal.name,
                goal.current.format_with_code(currency),
                goal.target.format_with_code(currency),
                percent
            ));
        frame.render_widget(gauge, *row);
    }
}
