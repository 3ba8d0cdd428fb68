//! Spending report view
//!
//! Spending by category over the transactions loaded so far.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::display::progress_bar;
use crate::models::category_glyph;
use crate::services::SpendingReport;
use crate::tui::app::App;
use crate::tui::layout::MainPanelLayout;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = MainPanelLayout::new(area);
    let report = SpendingReport::build(app.feed.items());
    let currency = app.settings.default_currency.as_str();

    let header_block = Block::default()
        .title(format!(
            " Spending Report: {} ",
            app.feed.filters().period().label()
        ))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let scope = if app.feed.has_more() {
        format!(
            "Based on {} loaded transaction(s); more available (n to load)",
            app.feed.len()
        )
    } else {
        format!("Based on all {} transaction(s)", app.feed.len())
    };
    frame.render_widget(
        Paragraph::new(scope)
            .block(header_block)
            .style(Style::default().fg(Color::DarkGray)),
        layout.header,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if report.is_empty() {
        let text = if app.feed.is_loading() {
            "Loading transactions…"
        } else {
            "No spending in the loaded transactions."
        };
        frame.render_widget(
            Paragraph::new(text)
                .block(block)
                .style(Style::default().fg(Color::DarkGray)),
            layout.content,
        );
        return;
    }

    let widths = [
        Constraint::Min(20),    // Category
        Constraint::Length(16), // Amount
        Constraint::Length(7),  // Share
        Constraint::Length(22), // Bar
    ];

    let header = Row::new(vec![
        Cell::from("Category"),
        Cell::from("Spent"),
        Cell::from("Share"),
        Cell::from(""),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let mut rows: Vec<Row> = report
        .categories
        .iter()
        .map(|spend| {
            Row::new(vec![
                Cell::from(format!(
                    "{} {}",
                    category_glyph(Some(&spend.category)),
                    spend.category
                )),
                Cell::from(spend.amount.format_with_code(currency)),
                Cell::from(format!("{:>5.1}%", spend.share * 100.0)),
                Cell::from(progress_bar(spend.share, 20)).style(Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();

    rows.push(
        Row::new(vec![
            Cell::from("Total"),
            Cell::from(report.total_spent.format_with_code(currency)),
            Cell::from(""),
            Cell::from(""),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    );
    if !report.uncategorized.is_zero() {
        rows.push(
            Row::new(vec![
                Cell::from("Uncategorized (not in total)"),
                Cell::from(report.uncategorized.format_with_code(currency)),
                Cell::from(""),
                Cell::from(""),
            ])
            .style(Style::default().fg(Color::DarkGray)),
        );
    }

    frame.render_widget(Table::new(rows, widths).header(header).block(block), layout.content);
}
