//! Explicit session state
//!
//! Everything the dashboard remembers between runs: the auth token and user,
//! the selected tenant and the dashboard preferences. Components read from a
//! `Session` value instead of touching the files directly; every mutation
//! persists immediately.

pub mod auth;
pub mod preferences;
pub mod tenant;

pub use auth::StoredAuth;
pub use preferences::{Preferences, Toggle};
pub use tenant::TenantState;

use crate::config::DashPaths;
use crate::error::{DashError, DashResult};
use crate::models::{AuthUser, LoginResponse, ReviewPeriod, Tenant, TenantId};

#[derive(Debug, Clone)]
pub struct Session {
    paths: DashPaths,
    auth: Option<StoredAuth>,
    pub tenant: TenantState,
    pub preferences: Preferences,
}

impl Session {
    /// Load all session state from disk
    pub fn load(paths: &DashPaths) -> DashResult<Self> {
        paths.ensure_directories()?;
        Ok(Self {
            auth: auth::load(paths)?,
            tenant: TenantState::load(paths)?,
            preferences: Preferences::load(paths)?,
            paths: paths.clone(),
        })
    }

    pub fn paths(&self) -> &DashPaths {
        &self.paths
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.auth.as_ref().map(|a| a.token.as_str())
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.auth.as_ref().map(|a| &a.user)
    }

    /// Store a successful login and adopt the tenant the server assigned
    ///
    /// Falls back to the tenant the login was requested for when the
    /// profile omits one.
    pub fn login(&mut self, response: LoginResponse, requested: &TenantId) -> DashResult<()> {
        let mut stored = StoredAuth::from(response);
        if stored.user.tenant_id.is_empty() {
            stored.user.tenant_id = requested.clone();
        }
        auth::save(&self.paths, &stored)?;

        let tenant_id = stored.user.tenant_id.clone();
        if !tenant_id.is_empty() {
            self.tenant.select_unchecked(tenant_id);
            self.tenant.save(&self.paths)?;
        }

        log::info!("Logged in as {}", stored.user.email);
        self.auth = Some(stored);
        Ok(())
    }

    /// Drop the token and user; tenant and preferences are kept
    pub fn logout(&mut self) -> DashResult<()> {
        auth::clear(&self.paths)?;
        if let Some(previous) = self.auth.take() {
            log::info!("Logged out {}", previous.user.email);
        }
        Ok(())
    }

    pub fn tenant_id(&self) -> Option<&TenantId> {
        self.tenant.selected()
    }

    /// Selected tenant, or an error naming how to pick one
    pub fn require_tenant(&self) -> DashResult<TenantId> {
        self.tenant.selected().cloned().ok_or_else(|| {
            DashError::Validation(
                "No tenant selected. Run 'budgetdash tenants use <ID>' first".into(),
            )
        })
    }

    /// Switch tenants; returns whether dependent data must be refetched
    pub fn select_tenant(&mut self, id: TenantId) -> DashResult<bool> {
        let changed = self.tenant.select(id)?;
        if changed {
            self.tenant.save(&self.paths)?;
        }
        Ok(changed)
    }

    /// Record a freshly fetched tenant list; returns whether the selection changed
    pub fn set_tenants(&mut self, tenants: Vec<Tenant>) -> DashResult<bool> {
        let changed = self.tenant.set_tenants(tenants);
        if changed {
            self.tenant.save(&self.paths)?;
        }
        Ok(changed)
    }

    pub fn period(&self) -> ReviewPeriod {
        self.preferences.period()
    }

    pub fn set_period(&mut self, period: ReviewPeriod) -> DashResult<()> {
        self.preferences.set_period(period);
        self.preferences.save(&self.paths)
    }

    /// Flip a preference toggle, returning its new value
    pub fn toggle(&mut self, toggle: Toggle) -> DashResult<bool> {
        let value = self.preferences.toggle(toggle);
        self.preferences.save(&self.paths)?;
        Ok(value)
    }

    pub fn reset_preferences(&mut self) -> DashResult<()> {
        self.preferences = Preferences::default();
        self.preferences.save(&self.paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn login_response() -> LoginResponse {
        LoginResponse {
            token: "jwt.token".into(),
            user: AuthUser {
                email: "asha@example.com".into(),
                name: "Asha".into(),
                tenant_id: TenantId::new("shop"),
                is_active: true,
            },
        }
    }

    #[test]
    fn test_login_persists_token_and_tenant() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut session = Session::load(&paths).unwrap();
        assert!(!session.is_authenticated());
        assert!(session.require_tenant().is_err());

        session.login(login_response(), &TenantId::new("home")).unwrap();

        let reloaded = Session::load(&paths).unwrap();
        assert_eq!(reloaded.token(), Some("jwt.token"));
        assert_eq!(reloaded.tenant_id().map(|t| t.as_str()), Some("shop"));
    }

    #[test]
    fn test_login_falls_back_to_requested_tenant() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut response = login_response();
        response.user.tenant_id = TenantId::default();

        let mut session = Session::load(&paths).unwrap();
        session.login(response, &TenantId::new("PERSONAL")).unwrap();
        assert_eq!(session.tenant_id().map(|t| t.as_str()), Some("PERSONAL"));
        assert_eq!(
            session.user().map(|u| u.tenant_id.as_str()),
            Some("PERSONAL")
        );
    }

    #[test]
    fn test_logout_keeps_tenant_and_preferences() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut session = Session::load(&paths).unwrap();
        session.login(login_response(), &TenantId::new("home")).unwrap();
        session.toggle(Toggle::SavingsGoals).unwrap();
        session.logout().unwrap();

        let reloaded = Session::load(&paths).unwrap();
        assert!(!reloaded.is_authenticated());
        assert!(reloaded.tenant_id().is_some());
        assert!(!reloaded.preferences.show_savings_goals);
    }

    #[test]
    fn test_period_and_reset() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut session = Session::load(&paths).unwrap();
        let period = ReviewPeriod::new(2022, 2).unwrap();
        session.set_period(period).unwrap();
        assert_eq!(Session::load(&paths).unwrap().period(), period);

        session.reset_preferences().unwrap();
        assert_eq!(
            Session::load(&paths).unwrap().preferences,
            Preferences::default()
        );
    }

    #[test]
    fn test_set_tenants_auto_selects_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut session = Session::load(&paths).unwrap();
        let changed = session
            .set_tenants(vec![Tenant {
                id: TenantId::new("home"),
                name: "Home".into(),
            }])
            .unwrap();
        assert!(changed);
        assert_eq!(
            Session::load(&paths).unwrap().tenant_id().map(|t| t.as_str()),
            Some("home")
        );
    }
}
