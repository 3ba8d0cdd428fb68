//! Login screen
//!
//! Email, password and tenant selection. Shown whenever there is no stored
//! token or the API rejects the current one.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use zeroize::Zeroizing;

use crate::models::TenantId;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// Tenants offered on the login form
pub const LOGIN_TENANTS: [&str; 3] = ["PERSONAL", "CLIENT", "DEFAULT"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
    Tenant,
}

impl LoginField {
    fn next(self) -> Self {
        match self {
            Self::Email => Self::Password,
            Self::Password => Self::Tenant,
            Self::Tenant => Self::Email,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Email => Self::Tenant,
            Self::Password => Self::Email,
            Self::Tenant => Self::Password,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginFormState {
    pub email: TextInput,
    pub password: TextInput,
    pub tenant_index: usize,
    pub focused_field: LoginField,
    /// A login request is in flight
    pub submitting: bool,
    pub error: Option<String>,
}

impl LoginFormState {
    /// Fresh form; a remembered email skips straight to the password
    pub fn new(email: Option<String>) -> Self {
        let focus = if email.is_some() {
            LoginField::Password
        } else {
            LoginField::Email
        };
        let mut state = Self {
            email: TextInput::new()
                .label("Email   ")
                .placeholder("you@example.com")
                .content(email.unwrap_or_default()),
            password: TextInput::new()
                .label("Password")
                .placeholder("password")
                .masked(true),
            tenant_index: 0,
            focused_field: focus,
            submitting: false,
            error: None,
        };
        state.set_focus(focus);
        state
    }

    pub fn set_focus(&mut self, field: LoginField) {
        self.focused_field = field;
        self.email.focused = field == LoginField::Email;
        self.password.focused = field == LoginField::Password;
    }

    pub fn next_field(&mut self) {
        self.set_focus(self.focused_field.next());
    }

    pub fn prev_field(&mut self) {
        self.set_focus(self.focused_field.prev());
    }

    /// The text input under the cursor; `None` on the tenant selector
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            LoginField::Email => Some(&mut self.email),
            LoginField::Password => Some(&mut self.password),
            LoginField::Tenant => None,
        }
    }

    pub fn cycle_tenant(&mut self, forward: bool) {
        let len = LOGIN_TENANTS.len();
        self.tenant_index = if forward {
            (self.tenant_index + 1) % len
        } else {
            (self.tenant_index + len - 1) % len
        };
    }

    pub fn tenant(&self) -> TenantId {
        TenantId::new(LOGIN_TENANTS[self.tenant_index % LOGIN_TENANTS.len()])
    }

    /// Credentials to send. The password field is wiped either way.
    pub fn take_credentials(&mut self) -> Result<(String, Zeroizing<String>, TenantId), String> {
        let email = self.email.trimmed();
        let password = Zeroizing::new(self.password.value().to_string());
        self.password.clear();

        match email {
            Some(email) if !password.is_empty() => Ok((email, password, self.tenant())),
            _ => {
                self.set_focus(if self.email.trimmed().is_none() {
                    LoginField::Email
                } else {
                    LoginField::Password
                });
                Err("Email and password are required.".to_string())
            }
        }
    }
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(60, 16, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" budgetdash: Log in ")
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
            Constraint::Length(1), // Endpoint
            Constraint::Length(1),
            Constraint::Length(1), // Email
            Constraint::Length(1), // Password
            Constraint::Length(1), // Tenant
            Constraint::Length(1),
            Constraint::Min(2),    // Error / progress
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(app.settings.endpoint.as_str()).style(Style::default().fg(Color::DarkGray)),
        chunks[0],
    );

    let form = &app.login_form;
    frame.render_widget(form.email.clone(), chunks[2]);
    frame.render_widget(form.password.clone(), chunks[3]);

    let tenant_style = if form.focused_field == LoginField::Tenant {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Tenant  : ", Style::default().fg(Color::Yellow)),
            Span::styled(format!("< {} >", form.tenant()), tenant_style),
        ])),
        chunks[4],
    );

    let status = if form.submitting {
        Paragraph::new("Logging in...").style(Style::default().fg(Color::Yellow))
    } else if let Some(ref error) = form.error {
        Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
    } else {
        Paragraph::new("")
    };
    frame.render_widget(status, chunks[6]);

    frame.render_widget(
        Paragraph::new("Tab:Next field  ←/→:Tenant  Enter:Log in  Esc:Quit")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[7],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remembered_email_focuses_password() {
        let form = LoginFormState::new(Some("a@b.c".into()));
        assert_eq!(form.focused_field, LoginField::Password);
        assert!(form.password.focused);
        assert_eq!(form.email.value(), "a@b.c");
    }

    #[test]
    fn test_take_credentials_requires_both() {
        let mut form = LoginFormState::new(None);
        form.email.set_value("a@b.c");
        let err = form.take_credentials().unwrap_err();
        assert_eq!(err, "Email and password are required.");
        assert_eq!(form.focused_field, LoginField::Password);
    }

    #[test]
    fn test_take_credentials_wipes_password() {
        let mut form = LoginFormState::new(Some(" a@b.c ".into()));
        form.password.set_value("hunter2");
        form.cycle_tenant(false);

        let (email, password, tenant) = form.take_credentials().unwrap();
        assert_eq!(email, "a@b.c");
        assert_eq!(password.as_str(), "hunter2");
        assert_eq!(tenant.as_str(), "DEFAULT");
        assert_eq!(form.password.value(), "");
    }

    #[test]
    fn test_field_cycle_reaches_tenant() {
        let mut form = LoginFormState::new(None);
        form.next_field();
        form.next_field();
        assert_eq!(form.focused_field, LoginField::Tenant);
        assert!(form.focused_input_mut().is_none());
        form.next_field();
        assert_eq!(form.focused_field, LoginField::Email);
    }
}
