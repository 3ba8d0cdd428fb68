//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! It never touches the network: requests are queued in an outbox that the
//! main loop hands to the fetch worker, and replies come back through
//! [`App::apply_reply`].

use crate::config::Settings;
use crate::error::DashError;
use crate::models::{
    MonthlyReview, ReviewPeriod, SavingsGoal, TenantId, Transaction, TransactionFilters,
};
use crate::services::{
    ApplyOutcome, PageRequest, ReclassifyLedger, ReclassifyRequest, SettleOutcome, Submitted,
    TransactionFeed,
};
use crate::session::{Session, Toggle};

use super::dialogs::filter::FilterFormState;
use super::dialogs::reclassify::ReclassifyState;
use super::fetch::{FetchReply, FetchRequest};
use super::views::login::LoginFormState;
use super::virtual_list::VirtualList;
use super::widgets::{ErrorInfo, Notification, NotificationQueue};

/// Data for one widget
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Top-level screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Waiting for the health check
    Connecting,
    /// Health check failed; nothing else is reachable
    Unavailable(ErrorInfo),
    Login,
    Dashboard,
}

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Overview,
    Transactions,
    Goals,
    Report,
    Settings,
}

impl ActiveView {
    pub const ALL: [ActiveView; 5] = [
        ActiveView::Overview,
        ActiveView::Transactions,
        ActiveView::Goals,
        ActiveView::Report,
        ActiveView::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Transactions => "Transactions",
            Self::Goals => "Savings Goals",
            Self::Report => "Spending Report",
            Self::Settings => "Settings",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }
}

/// Which panel currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    Sidebar,
    #[default]
    Main,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    Reclassify,
    Filter,
    Tenant,
}

/// Rows in the settings view: the dashboard toggles, then log out
pub const SETTINGS_ROWS: usize = Toggle::ALL.len() + 1;

pub struct App {
    pub settings: Settings,
    pub session: Session,

    pub should_quit: bool,
    pub screen: Screen,
    pub active_view: ActiveView,
    pub focused_panel: FocusedPanel,
    pub active_dialog: ActiveDialog,

    pub review: Loadable<MonthlyReview>,
    pub goals: Loadable<Vec<SavingsGoal>>,
    pub tenants_loading: bool,

    pub feed: TransactionFeed,
    pub ledger: ReclassifyLedger,
    /// Scroll state of the transaction table
    pub list: VirtualList,

    pub selected_transaction_index: usize,
    pub selected_goal_index: usize,
    pub selected_setting_index: usize,
    pub selected_tenant_index: usize,

    pub login_form: LoginFormState,
    pub reclassify_state: ReclassifyState,
    pub filter_form: FilterFormState,

    pub notifications: NotificationQueue,
    pub status_message: Option<String>,

    outbox: Vec<FetchRequest>,
}

impl App {
    /// Create the app and queue the health check
    pub fn new(settings: Settings, session: Session) -> Self {
        let filters = TransactionFilters::for_period(session.period());
        let login_form = LoginFormState::new(session.user().map(|u| u.email.clone()));
        let list = VirtualList::new(1, settings.overscan);

        let mut app = Self {
            settings,
            session,
            should_quit: false,
            screen: Screen::Connecting,
            active_view: ActiveView::default(),
            focused_panel: FocusedPanel::default(),
            active_dialog: ActiveDialog::default(),
            review: Loadable::Idle,
            goals: Loadable::Idle,
            tenants_loading: false,
            feed: TransactionFeed::new(filters),
            ledger: ReclassifyLedger::new(),
            list,
            selected_transaction_index: 0,
            selected_goal_index: 0,
            selected_setting_index: 0,
            selected_tenant_index: 0,
            login_form,
            reclassify_state: ReclassifyState::default(),
            filter_form: FilterFormState::default(),
            notifications: NotificationQueue::new(),
            status_message: None,
            outbox: Vec::new(),
        };
        app.request(FetchRequest::Health);
        app
    }

    fn request(&mut self, request: FetchRequest) {
        self.outbox.push(request);
    }

    /// Requests queued since the last call, in order
    pub fn take_requests(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.outbox)
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn on_tick(&mut self) {
        self.notifications.remove_expired();
    }

    pub fn period(&self) -> ReviewPeriod {
        self.session.period()
    }

    fn tenant(&self) -> Option<TenantId> {
        self.session.tenant_id().cloned()
    }

    /// Name shown in the sidebar and status bar
    pub fn tenant_label(&self) -> String {
        self.session
            .tenant
            .active_name()
            .or_else(|| self.session.tenant_id().map(|id| id.to_string()))
            .unwrap_or_else(|| "No tenant".to_string())
    }

    pub fn retry_health(&mut self) {
        self.screen = Screen::Connecting;
        self.request(FetchRequest::Health);
    }

    pub fn enter_dashboard(&mut self) {
        self.screen = Screen::Dashboard;
        self.tenants_loading = true;
        self.request(FetchRequest::Tenants);
        self.reload_data();
    }

    /// Refetch everything for the active tenant and period
    pub fn reload_data(&mut self) {
        let Some(tenant) = self.tenant() else {
            self.review = Loadable::Idle;
            self.goals = Loadable::Idle;
            self.set_status("No tenant selected. Press t to choose one.");
            return;
        };

        self.review = Loadable::Loading;
        self.request(FetchRequest::Review {
            tenant: tenant.clone(),
            period: self.period(),
        });
        self.goals = Loadable::Loading;
        self.request(FetchRequest::Goals { tenant });

        let filters = self.feed.filters().clone().with_period(self.period());
        self.restart_feed(filters);
    }

    fn restart_feed(&mut self, filters: TransactionFilters) {
        let page = match self.feed.set_filters(filters) {
            Some(page) => page,
            None => self.feed.refresh(),
        };
        self.selected_transaction_index = 0;
        self.list.reset();
        self.send_page(page);
    }

    fn send_page(&mut self, page: PageRequest) {
        if let Some(tenant) = self.tenant() {
            self.request(FetchRequest::Transactions { tenant, page });
        }
    }

    /// Move the selected month by one in either direction
    pub fn shift_period(&mut self, forward: bool) {
        let current = self.period();
        let period = if forward { current.next() } else { current.prev() };
        if let Err(e) = self.session.set_period(period) {
            log::warn!("Failed to save selected period: {}", e);
        }

        if let Some(tenant) = self.tenant() {
            self.review = Loadable::Loading;
            self.request(FetchRequest::Review { tenant, period });
            let filters = self.feed.filters().clone().with_period(period);
            self.restart_feed(filters);
        }
        self.set_status(period.label());
    }

    /// Replace the transaction filters from the filter dialog
    pub fn apply_filters(&mut self, filters: TransactionFilters) {
        if filters == *self.feed.filters() {
            return;
        }
        self.restart_feed(filters);
    }

    pub fn clear_filters(&mut self) {
        self.apply_filters(TransactionFilters::for_period(self.period()));
    }

    /// Drop loaded rows and fetch page one again
    pub fn refresh_transactions(&mut self) {
        let page = self.feed.refresh();
        self.selected_transaction_index = 0;
        self.list.reset();
        self.send_page(page);
    }

    pub fn load_more(&mut self) {
        if let Some(page) = self.feed.load_more() {
            self.send_page(page);
        }
    }

    /// Fetch the next page once the rendered window reaches the loaded rows' end
    pub fn maybe_load_more(&mut self) {
        if !self.feed.has_more() || self.feed.is_loading() || self.list.viewport() == 0 {
            return;
        }
        if self.list.window().end >= self.feed.len() {
            self.load_more();
        }
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.feed.items().get(self.selected_transaction_index)
    }

    /// Move the transaction cursor by `delta` rows
    pub fn move_transaction_selection(&mut self, delta: isize) {
        let len = self.feed.len();
        if len == 0 {
            return;
        }
        let index = self.selected_transaction_index as isize + delta;
        self.selected_transaction_index = index.clamp(0, len as isize - 1) as usize;
        self.sync_list();
    }

    pub fn select_last_transaction(&mut self) {
        self.selected_transaction_index = self.feed.len().saturating_sub(1);
        self.sync_list();
    }

    /// Keep the list geometry in step with the feed and the selection
    pub fn sync_list(&mut self) {
        self.list.set_len(self.feed.len());
        self.selected_transaction_index = self
            .selected_transaction_index
            .min(self.feed.len().saturating_sub(1));
        self.list.ensure_visible(self.selected_transaction_index);
        self.maybe_load_more();
    }

    /// Called by the renderer once the table's height is known
    pub fn set_viewport(&mut self, rows: usize) {
        if self.list.viewport() != rows {
            self.list.set_viewport(rows);
            self.sync_list();
        }
    }

    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
        if view == ActiveView::Transactions {
            self.sync_list();
        }
    }

    pub fn next_view(&mut self) {
        let index = (self.active_view.index() + 1) % ActiveView::ALL.len();
        self.switch_view(ActiveView::ALL[index]);
    }

    pub fn prev_view(&mut self) {
        let len = ActiveView::ALL.len();
        let index = (self.active_view.index() + len - 1) % len;
        self.switch_view(ActiveView::ALL[index]);
    }

    pub fn toggle_panel_focus(&mut self) {
        self.focused_panel = match self.focused_panel {
            FocusedPanel::Sidebar => FocusedPanel::Main,
            FocusedPanel::Main => FocusedPanel::Sidebar,
        };
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        match dialog {
            ActiveDialog::Reclassify => {
                let Some(txn) = self.selected_transaction() else {
                    self.set_status("No transaction selected");
                    return;
                };
                self.reclassify_state = ReclassifyState::for_transaction(txn);
            }
            ActiveDialog::Filter => {
                self.filter_form = FilterFormState::from_filters(self.feed.filters());
            }
            ActiveDialog::Tenant => {
                if self.session.tenant.tenants().is_empty() {
                    self.set_status("No tenants loaded yet");
                    if !self.tenants_loading {
                        self.tenants_loading = true;
                        self.request(FetchRequest::Tenants);
                    }
                    return;
                }
                self.selected_tenant_index = self.session.tenant.selected_index().unwrap_or(0);
            }
            ActiveDialog::Help | ActiveDialog::None => {}
        }
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    /// Switch to the tenant at `index` in the loaded list
    pub fn select_tenant(&mut self, index: usize) {
        let Some(tenant) = self.session.tenant.tenants().get(index).cloned() else {
            return;
        };
        match self.session.select_tenant(tenant.id) {
            Ok(true) => {
                // replies for the old tenant are dropped, so nothing here would settle
                self.ledger.clear();
                self.notify(Notification::info(format!("Switched to {}", tenant.name)));
                self.reload_data();
            }
            Ok(false) => {}
            Err(e) => self.notify(Notification::error(e.to_string())),
        }
    }

    pub fn toggle_preference(&mut self, toggle: Toggle) {
        match self.session.toggle(toggle) {
            Ok(enabled) => self.set_status(format!(
                "{}: {}",
                toggle.label(),
                if enabled { "shown" } else { "hidden" }
            )),
            Err(e) => self.notify(Notification::error(format!(
                "Failed to save preferences: {}",
                e
            ))),
        }
    }

    /// Activate the selected row of the settings view
    pub fn activate_setting(&mut self) {
        match Toggle::ALL.get(self.selected_setting_index) {
            Some(toggle) => self.toggle_preference(*toggle),
            None => self.logout(),
        }
    }

    pub fn submit_login(&mut self) {
        if self.login_form.submitting {
            return;
        }
        match self.login_form.take_credentials() {
            Ok((email, password, tenant)) => {
                self.login_form.submitting = true;
                self.login_form.error = None;
                self.request(FetchRequest::Login {
                    email,
                    password,
                    tenant,
                });
            }
            Err(e) => self.login_form.error = Some(e),
        }
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.session.logout() {
            log::warn!("Failed to clear stored session: {}", e);
        }
        self.drop_session_state();
        self.login_form.error = None;
        self.set_status("Logged out");
    }

    fn drop_session_state(&mut self) {
        self.request(FetchRequest::SetToken(None));
        self.ledger.clear();
        self.feed = TransactionFeed::new(TransactionFilters::for_period(self.period()));
        self.list.reset();
        self.review = Loadable::Idle;
        self.goals = Loadable::Idle;
        self.active_dialog = ActiveDialog::None;
        self.login_form.submitting = false;
        self.screen = Screen::Login;
    }

    /// Credentials were rejected mid-session
    fn handle_auth_failure(&mut self, error: &DashError) {
        log::warn!("Session rejected by the API: {}", error);
        if let Err(e) = self.session.logout() {
            log::warn!("Failed to clear stored session: {}", e);
        }
        self.drop_session_state();
        self.login_form.error = Some("Session expired. Please log in again.".into());
    }

    /// Route an error: auth failures end the session, the rest become a
    /// "Failed to load" notification
    fn report_failure(&mut self, what: &str, error: &DashError) -> String {
        if error.is_auth_failure() {
            self.handle_auth_failure(error);
        } else {
            log::warn!("Failed to load {}: {}", what, error);
            self.notify(Notification::failed_to_load(what));
        }
        format!("Failed to load {}", what)
    }

    /// Fold a worker reply into state
    pub fn apply_reply(&mut self, reply: FetchReply) {
        match reply {
            FetchReply::Health(status) => {
                if !status.is_healthy() {
                    self.screen = Screen::Unavailable(ErrorInfo::from_health(&status));
                } else if self.session.is_authenticated() {
                    self.enter_dashboard();
                } else {
                    self.screen = Screen::Login;
                }
            }
            FetchReply::Tenants(result) => {
                self.tenants_loading = false;
                match result {
                    Ok(tenants) => match self.session.set_tenants(tenants) {
                        Ok(true) => {
                            self.ledger.clear();
                            self.clear_status();
                            self.reload_data();
                        }
                        Ok(false) => {}
                        Err(e) => log::warn!("Failed to save tenant selection: {}", e),
                    },
                    Err(e) => {
                        self.report_failure("tenants", &e);
                    }
                }
            }
            FetchReply::Review {
                tenant,
                period,
                result,
            } => {
                if Some(&tenant) != self.session.tenant_id() || period != self.period() {
                    log::debug!("Dropping review for {} {}", tenant, period);
                    return;
                }
                self.review = match result {
                    Ok(review) => Loadable::Loaded(review),
                    Err(e) => Loadable::Failed(self.report_failure("monthly review", &e)),
                };
            }
            FetchReply::Goals { tenant, result } => {
                if Some(&tenant) != self.session.tenant_id() {
                    log::debug!("Dropping goals for {}", tenant);
                    return;
                }
                self.goals = match result {
                    Ok(goals) => {
                        self.selected_goal_index =
                            self.selected_goal_index.min(goals.len().saturating_sub(1));
                        Loadable::Loaded(goals)
                    }
                    Err(e) => Loadable::Failed(self.report_failure("savings goals", &e)),
                };
            }
            FetchReply::Transactions {
                tenant,
                ticket,
                result,
            } => {
                if Some(&tenant) != self.session.tenant_id() {
                    log::debug!("Dropping transactions page for {}", tenant);
                    return;
                }
                match self.feed.apply(ticket, result) {
                    ApplyOutcome::Applied(_) => self.sync_list(),
                    ApplyOutcome::Stale => {}
                    ApplyOutcome::Failed(e) => {
                        self.report_failure("transactions", &e);
                    }
                }
            }
            FetchReply::Reclassified {
                tenant,
                id,
                seq,
                result,
            } => {
                if Some(&tenant) != self.session.tenant_id() {
                    log::debug!("Dropping reclassification of {} for {}", id, tenant);
                    return;
                }
                let settlement = self.ledger.settle(self.feed.items_mut(), &id, seq, result);
                match settlement.outcome {
                    SettleOutcome::Confirmed(server) => {
                        self.set_status(format!("Reclassified as {}", server.category));
                    }
                    SettleOutcome::RolledBack(e) => {
                        if e.is_auth_failure() {
                            self.handle_auth_failure(&e);
                            return;
                        }
                        self.notify(Notification::error(
                            "Failed to reclassify transaction; change reverted",
                        ));
                    }
                    SettleOutcome::Unknown => {}
                }
                if let Some(next) = settlement.next {
                    self.dispatch_reclassify(next);
                }
            }
            FetchReply::LoggedIn { tenant, result } => {
                self.login_form.submitting = false;
                match result {
                    Ok(response) => {
                        let token = zeroize::Zeroizing::new(response.token.clone());
                        if let Err(e) = self.session.login(response, &tenant) {
                            self.login_form.error = Some(format!("Failed to save session: {}", e));
                            return;
                        }
                        self.request(FetchRequest::SetToken(Some(token)));
                        self.login_form.error = None;
                        self.enter_dashboard();
                    }
                    Err(e) => {
                        log::warn!("Login failed: {}", e);
                        self.login_form.error = Some(login_error_message(&e));
                    }
                }
            }
        }
    }

    fn dispatch_reclassify(&mut self, request: ReclassifyRequest) {
        if let Some(tenant) = self.tenant() {
            self.request(FetchRequest::Reclassify { tenant, request });
        }
    }

    /// Apply the reclassify dialog locally and send it
    pub fn submit_reclassify(&mut self) {
        let Some(id) = self.reclassify_state.id.clone() else {
            self.close_dialog();
            return;
        };
        let category = self.reclassify_state.input.value().to_string();

        match self.ledger.submit(self.feed.items_mut(), &id, &category) {
            Ok(Submitted::Dispatch(request)) => {
                self.close_dialog();
                self.set_status(format!("Reclassifying as {}...", request.category));
                self.dispatch_reclassify(request);
            }
            Ok(Submitted::Queued) => {
                self.close_dialog();
                self.notify(Notification::info(
                    "Previous change still saving; this one will follow",
                ));
            }
            Err(e) => self.reclassify_state.error = Some(e.to_string()),
        }
    }
}

fn login_error_message(error: &DashError) -> String {
    match error {
        DashError::Validation(msg) | DashError::Unauthenticated(msg) => msg.clone(),
        DashError::GraphQl(messages) => messages.join("; "),
        other => format!("Login failed: {}", other),
    }
}
