//! Error panel widget
//!
//! Displays an error with recovery suggestions. Used full-screen when the
//! health gate fails.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::error::DashError;
use crate::services::health::HealthStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub title: String,
    pub details: String,
    pub suggestions: Vec<String>,
}

impl ErrorInfo {
    pub fn from_error(error: &DashError) -> Self {
        let (title, suggestions) = match error {
            DashError::Network(_) => (
                "Connection Error",
                vec![
                    "Check that the API server is running".to_string(),
                    "Verify the endpoint with 'budgetdash config'".to_string(),
                ],
            ),
            DashError::Http { status: 403, .. } => (
                "Forbidden",
                vec!["Set BUDGETDASH_API_KEY or api_key in config.json".to_string()],
            ),
            DashError::Http { .. } => (
                "Server Error",
                vec!["The API returned an error status; check the server logs".to_string()],
            ),
            DashError::GraphQl(_) => (
                "Request Rejected",
                vec!["The API reported errors for this request".to_string()],
            ),
            DashError::Unauthenticated(_) => (
                "Not Logged In",
                vec!["Log in again to continue".to_string()],
            ),
            DashError::Config(_) => (
                "Configuration Error",
                vec!["Check config.json for invalid values".to_string()],
            ),
            DashError::Io(_) | DashError::Json(_) | DashError::Storage(_) => (
                "Storage Error",
                vec!["Check that the data directory is writable".to_string()],
            ),
            DashError::Validation(_) => (
                "Validation Error",
                vec!["Review the input values and try again".to_string()],
            ),
            DashError::NotFound { .. } => ("Not Found", Vec::new()),
            DashError::Export(_) => (
                "Export Error",
                vec!["Check that you can write to the output path".to_string()],
            ),
            DashError::Tui(_) => (
                "Interface Error",
                vec!["Try resizing your terminal window".to_string()],
            ),
        };

        Self {
            title: title.to_string(),
            details: error.to_string(),
            suggestions,
        }
    }

    /// Why the dashboard cannot start
    pub fn from_health(status: &HealthStatus) -> Self {
        let suggestions = match status {
            HealthStatus::Forbidden => vec![
                "Set BUDGETDASH_API_KEY or api_key in config.json".to_string(),
                "Or allow unauthenticated health checks on the server".to_string(),
            ],
            HealthStatus::Unreachable(_) => vec![
                "Check that the API server is running".to_string(),
                "Verify the endpoint with 'budgetdash config'".to_string(),
            ],
            HealthStatus::Healthy(_) => Vec::new(),
        };

        Self {
            title: status.title().to_string(),
            details: status.message(),
            suggestions,
        }
    }

    pub fn simple(title: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            details: details.into(),
            suggestions: vec![],
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

pub struct ErrorDialog<'a> {
    error: &'a ErrorInfo,
    hint: &'a str,
}

impl<'a> ErrorDialog<'a> {
    pub fn new(error: &'a ErrorInfo) -> Self {
        Self {
            error,
            hint: "Press Esc or Enter to close",
        }
    }

    /// Replace the key hint on the last line
    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = hint;
        self
    }
}

impl<'a> Widget for ErrorDialog<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" Error: {} ", self.error.title))
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(4), // Details
                Constraint::Min(1),    // Suggestions
                Constraint::Length(1), // Hint
            ])
            .split(inner);

        Paragraph::new(self.error.details.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        if !self.error.suggestions.is_empty() {
            let mut lines: Vec<Line> = vec![Line::from(Span::styled(
                "Suggestions:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))];

            for suggestion in &self.error.suggestions {
                lines.push(Line::from(vec![
                    Span::raw("  - "),
                    Span::raw(suggestion.as_str()),
                ]));
            }

            Paragraph::new(lines)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true })
                .render(chunks[1], buf);
        }

        Paragraph::new(self.hint)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

/// Calculate the area for an error dialog (centered in parent)
pub fn error_dialog_area(parent: Rect) -> Rect {
    let width = (parent.width * 70 / 100).clamp(40, 80).min(parent.width);
    let height = (parent.height * 50 / 100).clamp(12, 20).min(parent.height);

    let x = parent.x + (parent.width - width) / 2;
    let y = parent.y + (parent.height - height) / 2;

    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::health::FORBIDDEN_MESSAGE;

    #[test]
    fn test_error_info_from_network_error() {
        let info = ErrorInfo::from_error(&DashError::Network("connection refused".into()));
        assert_eq!(info.title, "Connection Error");
        assert!(info.details.contains("connection refused"));
        assert_eq!(info.suggestions.len(), 2);
    }

    #[test]
    fn test_error_info_from_forbidden_health() {
        let info = ErrorInfo::from_health(&HealthStatus::Forbidden);
        assert_eq!(info.title, "Forbidden");
        assert_eq!(info.details, FORBIDDEN_MESSAGE);
    }

    #[test]
    fn test_error_info_from_unreachable_health() {
        let info = ErrorInfo::from_health(&HealthStatus::Unreachable("timed out".into()));
        assert_eq!(info.title, "Connection Error");
        assert_eq!(info.details, "timed out");
    }

    #[test]
    fn test_dialog_area_fits_small_terminal() {
        let area = error_dialog_area(Rect::new(0, 0, 30, 8));
        assert!(area.width <= 30 && area.height <= 8);
    }
}
