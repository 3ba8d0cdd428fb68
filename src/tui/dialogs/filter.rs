//! Transaction filter dialog
//!
//! Search, category and bank filters for the transaction list. The month
//! comes from the period selector and is left untouched.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::TransactionFilters;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    Search,
    Category,
    Bank,
}

impl FilterField {
    fn next(self) -> Self {
        match self {
            Self::Search => Self::Category,
            Self::Category => Self::Bank,
            Self::Bank => Self::Search,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Search => Self::Bank,
            Self::Category => Self::Search,
            Self::Bank => Self::Category,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterFormState {
    pub search: TextInput,
    pub category: TextInput,
    pub bank: TextInput,
    pub focused_field: FilterField,
}

impl FilterFormState {
    pub fn from_filters(filters: &TransactionFilters) -> Self {
        let mut state = Self {
            search: TextInput::new()
                .label("Search  ")
                .placeholder("description text")
                .content(filters.search.clone().unwrap_or_default()),
            category: TextInput::new()
                .label("Category")
                .placeholder("any")
                .content(filters.category.clone().unwrap_or_default()),
            bank: TextInput::new()
                .label("Bank    ")
                .placeholder("any")
                .content(filters.bank_name.clone().unwrap_or_default()),
            focused_field: FilterField::Search,
        };
        state.set_focus(FilterField::Search);
        state
    }

    pub fn set_focus(&mut self, field: FilterField) {
        self.focused_field = field;
        self.search.focused = field == FilterField::Search;
        self.category.focused = field == FilterField::Category;
        self.bank.focused = field == FilterField::Bank;
    }

    pub fn next_field(&mut self) {
        self.set_focus(self.focused_field.next());
    }

    pub fn prev_field(&mut self) {
        self.set_focus(self.focused_field.prev());
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.focused_field {
            FilterField::Search => &mut self.search,
            FilterField::Category => &mut self.category,
            FilterField::Bank => &mut self.bank,
        }
    }

    /// `base` with this form's narrowing applied
    pub fn apply_to(&self, base: &TransactionFilters) -> TransactionFilters {
        base.clone()
            .with_search(self.search.trimmed())
            .with_category(self.category.trimmed())
            .with_bank(self.bank.trimmed())
    }
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(60, 11, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Filter Transactions ")
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
            Constraint::Length(1), // Period
            Constraint::Length(1),
            Constraint::Length(1), // Search
            Constraint::Length(1), // Category
            Constraint::Length(1), // Bank
            Constraint::Min(0),
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(format!("Month: {}", app.period().label()))
            .style(Style::default().fg(Color::DarkGray)),
        chunks[0],
    );

    let form = &app.filter_form;
    frame.render_widget(form.search.clone(), chunks[2]);
    frame.render_widget(form.category.clone(), chunks[3]);
    frame.render_widget(form.bank.clone(), chunks[4]);

    frame.render_widget(
        Paragraph::new("Tab:Next field  Ctrl+U:Clear field  Enter:Apply  Esc:Cancel")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[6],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewPeriod;

    #[test]
    fn test_round_trip_through_form() {
        let base = TransactionFilters::for_period(ReviewPeriod::new(2025, 4).unwrap())
            .with_category(Some("Food".into()));
        let mut form = FilterFormState::from_filters(&base);
        assert_eq!(form.category.value(), "Food");
        assert!(form.search.focused);

        form.search.set_value("uber ");
        form.next_field();
        form.focused_input_mut().clear();

        let filters = form.apply_to(&base);
        assert_eq!(filters.search.as_deref(), Some("uber"));
        assert!(filters.category.is_none());
        assert_eq!(filters.period(), base.period());
    }

    #[test]
    fn test_field_cycle() {
        let mut form = FilterFormState::default();
        form.prev_field();
        assert_eq!(form.focused_field, FilterField::Bank);
        assert!(form.bank.focused);
        form.next_field();
        assert_eq!(form.focused_field, FilterField::Search);
    }
}
