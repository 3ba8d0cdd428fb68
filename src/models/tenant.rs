//! Tenants (workspaces) and authenticated users

use serde::{Deserialize, Serialize};

use super::ids::TenantId;

/// A workspace whose dataset subsequent queries operate on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
}

/// User profile returned by the login mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub tenant_id: TenantId,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Token plus profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_shape() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"token":"jwt.abc","user":{"email":"a@b.c","name":"Asha","tenantId":"home"}}"#,
        )
        .unwrap();
        assert_eq!(resp.user.tenant_id.as_str(), "home");
        assert!(resp.user.is_active);
    }

    #[test]
    fn test_user_without_tenant() {
        let user: AuthUser =
            serde_json::from_str(r#"{"email":"a@b.c","name":"Asha"}"#).unwrap();
        assert!(user.tenant_id.is_empty());
    }
}
