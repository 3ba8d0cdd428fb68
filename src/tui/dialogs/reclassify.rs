//! Reclassify dialog
//!
//! Edits the category of the selected transaction. The change is written to
//! the row as soon as the dialog is submitted.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{category_glyph, Transaction, TransactionId};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

#[derive(Debug, Clone, Default)]
pub struct ReclassifyState {
    pub id: Option<TransactionId>,
    pub description: String,
    pub current: Option<String>,
    pub input: TextInput,
    pub error: Option<String>,
}

impl ReclassifyState {
    pub fn for_transaction(txn: &Transaction) -> Self {
        Self {
            id: Some(txn.id.clone()),
            description: txn.description_or_default().to_string(),
            current: txn.category.clone(),
            input: TextInput::new()
                .label("Category")
                .placeholder("e.g. Groceries")
                .content(txn.category.clone().unwrap_or_default())
                .focused(true),
            error: None,
        }
    }
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(56, 10, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Reclassify Transaction ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Description
            Constraint::Length(1), // Current category
            Constraint::Length(1),
            Constraint::Length(1), // Input
            Constraint::Length(1), // Error
            Constraint::Min(0),
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    let state = &app.reclassify_state;
    frame.render_widget(
        Paragraph::new(state.description.as_str()).style(Style::default().fg(Color::White)),
        chunks[0],
    );

    let current = state.current.as_deref();
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Current: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!(
                "{} {}",
                category_glyph(current),
                current.unwrap_or("Uncategorized")
            )),
        ])),
        chunks[1],
    );

    frame.render_widget(state.input.clone(), chunks[3]);

    if let Some(error) = &state.error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            chunks[4],
        );
    }

    frame.render_widget(
        Paragraph::new("Enter:Save  Esc:Cancel").style(Style::default().fg(Color::DarkGray)),
        chunks[6],
    );
}
