//! Transaction list view
//!
//! Only the rows in the virtual window are turned into table rows; the
//! scrollbar is sized from the full loaded list.

use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
        Table, TableState,
    },
    Frame,
};

use crate::display::truncate;
use crate::models::{category_color, category_glyph, Transaction};
use crate::tui::app::{App, FocusedPanel};
use crate::tui::layout::MainPanelLayout;

/// Table borders plus the header row
const TABLE_CHROME: u16 = 3;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = MainPanelLayout::new(area);
    render_header(frame, app, layout.header);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(layout.content);

    render_table(frame, app, chunks[0]);
    render_footer(frame, app, chunks[1]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let filters = app.feed.filters();
    let block = Block::default()
        .title(format!(" Transactions: {} ", filters.period().label()))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let line = if filters.has_narrowing() {
        Line::from(vec![
            Span::styled("Filters: ", Style::default().fg(Color::Yellow)),
            Span::styled(filters.summary(), Style::default().fg(Color::White)),
            Span::styled("  (F to clear)", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(Span::styled(
            "e:Reclassify  f:Filter  n:Load more  r:Refresh",
            Style::default().fg(Color::DarkGray),
        ))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focused_panel == FocusedPanel::Main;
    let border_color = if is_focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    app.set_viewport(area.height.saturating_sub(TABLE_CHROME) as usize);

    if app.feed.is_empty() {
        let (text, color) = if app.feed.is_loading() {
            ("Loading transactions…".to_string(), Color::Yellow)
        } else if let Some(error) = app.feed.error() {
            (format!("{} Press r to retry.", error), Color::Red)
        } else if app.feed.is_empty_result() {
            ("No transactions found.".to_string(), Color::DarkGray)
        } else {
            (String::new(), Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new(text)
                .block(block)
                .style(Style::default().fg(color)),
            area,
        );
        return;
    }

    let widths = [
        Constraint::Length(12), // Date
        Constraint::Min(20),    // Description
        Constraint::Length(22), // Category
        Constraint::Length(14), // Amount
        Constraint::Length(8),  // Tagged by
    ];

    let header = Row::new(vec![
        Cell::from("Date").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Description").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Category").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Amount").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Tagged").style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let window = app.list.window();
    let date_format = app.settings.date_format.as_str();
    let rows: Vec<Row> = app.feed.items()[window.range()]
        .iter()
        .map(|txn| transaction_row(txn, date_format, app.ledger.is_pending(&txn.id)))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let selected = app.selected_transaction_index;
    let mut state = TableState::default()
        .with_offset(app.list.first_visible().saturating_sub(window.start))
        .with_selected(window.contains(selected).then(|| selected - window.start));

    frame.render_stateful_widget(table, area, &mut state);

    let mut scrollbar_state = ScrollbarState::new(app.list.total_size())
        .viewport_content_length(app.list.viewport())
        .position(app.list.scroll_offset());
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}

fn transaction_row(txn: &Transaction, date_format: &str, pending: bool) -> Row<'static> {
    let (r, g, b) = category_color(txn.category.as_deref());
    let category = format!(
        "{} {}{}",
        category_glyph(txn.category.as_deref()),
        truncate(txn.category_or_default(), 16),
        if pending { " …" } else { "" }
    );

    let amount_style = if txn.is_outflow() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let tagged_style = if txn.is_user_tagged() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Row::new(vec![
        Cell::from(txn.display_date(date_format)),
        Cell::from(truncate(txn.description_or_default(), 40)),
        Cell::from(category).style(Style::default().fg(Color::Rgb(r, g, b))),
        Cell::from(txn.amount.format_with_code(&txn.currency)).style(amount_style),
        Cell::from(txn.tagged_by.clone().unwrap_or_else(|| "-".into())).style(tagged_style),
    ])
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let loaded = app.feed.len();
    let text = if app.feed.is_loading() && loaded > 0 {
        format!(" {} loaded · loading more…", loaded)
    } else if app.feed.has_more() {
        format!(" {} loaded · more available (n to load)", loaded)
    } else if loaded > 0 {
        format!(" {} transaction(s)", loaded)
    } else {
        String::new()
    };

    let position = if loaded > 0 {
        format!("{}/{} ", app.selected_transaction_index + 1, loaded)
    } else {
        String::new()
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(position.len() as u16)])
        .split(area);

    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(position).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DashPaths, Settings};
    use crate::models::{Money, TransactionId, TransactionPage};
    use crate::session::Session;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> App {
        let paths = DashPaths::with_base_dir(dir.path().to_path_buf());
        App::new(Settings::default(), Session::load(&paths).unwrap())
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, app, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_empty_page_renders_message() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        let page = app.feed.refresh();
        app.feed.apply(page.ticket, Ok(TransactionPage::default()));

        let screen = draw(&mut app);
        assert!(screen.contains("No transactions found."));
        assert!(!screen.contains("Loading transactions"));
    }

    #[test]
    fn test_loading_state_before_first_page() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.feed.refresh();

        let screen = draw(&mut app);
        assert!(screen.contains("Loading transactions"));
        assert!(!screen.contains("No transactions found."));
    }

    #[test]
    fn test_rows_render_with_position() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        let page = app.feed.refresh();
        let items = (0..3)
            .map(|i| Transaction {
                id: TransactionId::new(format!("t{}", i)),
                date: "2025-04-01".into(),
                description: Some(format!("Shop {}", i)),
                amount: Money::from_units(-1000),
                currency: "INR".into(),
                category: Some("Food".into()),
                sub_category: None,
                tagged_by: None,
                confidence: None,
            })
            .collect();
        app.feed.apply(
            page.ticket,
            Ok(TransactionPage {
                items,
                cursor: None,
            }),
        );
        app.sync_list();

        let screen = draw(&mut app);
        assert!(screen.contains("Shop 2"));
        assert!(screen.contains("1/3"));
        assert!(!screen.contains("No transactions found."));
    }
}
