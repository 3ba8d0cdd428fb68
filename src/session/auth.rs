//! Persisted authentication state
//!
//! The token and user profile live in `session/auth.json`. No expiry is
//! enforced client-side; the API rejecting the token is what ends a session.

use serde::{Deserialize, Serialize};

use crate::config::DashPaths;
use crate::error::DashResult;
use crate::models::{AuthUser, LoginResponse};
use crate::storage::{read_json_opt, remove_if_exists, write_json_atomic};

/// Token plus the profile it was issued for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAuth {
    pub token: String,
    pub user: AuthUser,
}

impl From<LoginResponse> for StoredAuth {
    fn from(resp: LoginResponse) -> Self {
        Self {
            token: resp.token,
            user: resp.user,
        }
    }
}

/// Load the stored auth, discarding a file that no longer parses
pub fn load(paths: &DashPaths) -> DashResult<Option<StoredAuth>> {
    let path = paths.auth_file();
    match read_json_opt::<StoredAuth, _>(&path) {
        Ok(auth) => Ok(auth.filter(|a| !a.token.trim().is_empty())),
        Err(e) => {
            log::warn!("Failed to parse stored auth, discarding it: {}", e);
            remove_if_exists(&path)?;
            Ok(None)
        }
    }
}

pub fn save(paths: &DashPaths, auth: &StoredAuth) -> DashResult<()> {
    write_json_atomic(paths.auth_file(), auth)
}

pub fn clear(paths: &DashPaths) -> DashResult<()> {
    remove_if_exists(paths.auth_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TenantId;
    use tempfile::TempDir;

    fn sample_auth() -> StoredAuth {
        StoredAuth {
            token: "jwt.token".into(),
            user: AuthUser {
                email: "asha@example.com".into(),
                name: "Asha".into(),
                tenant_id: TenantId::new("home"),
                is_active: true,
            },
        }
    }

    #[test]
    fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(load(&paths).unwrap().is_none());
        save(&paths, &sample_auth()).unwrap();
        assert_eq!(load(&paths).unwrap(), Some(sample_auth()));

        clear(&paths).unwrap();
        assert!(load(&paths).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_auth_is_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.auth_file(), "{\"token\": 12").unwrap();

        assert!(load(&paths).unwrap().is_none());
        assert!(!paths.auth_file().exists());
    }
}
