//! Tenant selection
//!
//! The selected tenant id scopes every query. When nothing is selected and a
//! tenant list arrives, the first tenant is picked.

use serde::{Deserialize, Serialize};

use crate::config::DashPaths;
use crate::error::{DashError, DashResult};
use crate::models::{Tenant, TenantId};
use crate::storage::{read_json_opt, write_json_atomic};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTenant {
    tenant_id: Option<TenantId>,
}

/// Known tenants plus the current selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TenantState {
    selected: Option<TenantId>,
    tenants: Vec<Tenant>,
}

impl TenantState {
    pub fn load(paths: &DashPaths) -> DashResult<Self> {
        let stored = match read_json_opt::<StoredTenant, _>(paths.tenant_file()) {
            Ok(stored) => stored.unwrap_or_default(),
            Err(e) => {
                log::warn!("Ignoring unreadable tenant selection: {}", e);
                StoredTenant::default()
            }
        };
        Ok(Self {
            selected: stored.tenant_id.filter(|id| !id.is_empty()),
            tenants: Vec::new(),
        })
    }

    pub fn save(&self, paths: &DashPaths) -> DashResult<()> {
        write_json_atomic(
            paths.tenant_file(),
            &StoredTenant {
                tenant_id: self.selected.clone(),
            },
        )
    }

    pub fn selected(&self) -> Option<&TenantId> {
        self.selected.as_ref()
    }

    pub fn tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    /// The selected tenant's record, if the list has been loaded
    pub fn active(&self) -> Option<&Tenant> {
        let id = self.selected.as_ref()?;
        self.tenants.iter().find(|t| &t.id == id)
    }

    /// Display name of the selection, falling back to the raw id
    pub fn active_name(&self) -> Option<String> {
        self.active()
            .map(|t| t.name.clone())
            .or_else(|| self.selected.as_ref().map(|id| id.to_string()))
    }

    /// Select a tenant by id. Unknown ids are rejected once a list is loaded.
    ///
    /// Returns whether the selection changed.
    pub fn select(&mut self, id: TenantId) -> DashResult<bool> {
        if !self.tenants.is_empty() && !self.tenants.iter().any(|t| t.id == id) {
            return Err(DashError::tenant_not_found(id.as_str()));
        }
        let changed = self.selected.as_ref() != Some(&id);
        self.selected = Some(id);
        Ok(changed)
    }

    /// Select a tenant the server assigned, without checking the loaded list
    pub(crate) fn select_unchecked(&mut self, id: TenantId) {
        self.selected = Some(id);
    }

    /// Replace the tenant list; auto-selects the first tenant when none is selected
    ///
    /// Returns whether the selection changed.
    pub fn set_tenants(&mut self, tenants: Vec<Tenant>) -> bool {
        self.tenants = tenants;
        if self.selected.is_none() {
            if let Some(first) = self.tenants.first() {
                self.selected = Some(first.id.clone());
                return true;
            }
        }
        false
    }

    /// Index of the selection within the loaded list
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected.as_ref()?;
        self.tenants.iter().position(|t| &t.id == id)
    }
}
