//! Tenant and session formatting

use crate::models::{AuthUser, Tenant, TenantId};

pub fn format_tenant_list(tenants: &[Tenant], selected: Option<&TenantId>) -> String {
    if tenants.is_empty() {
        return "No tenants available.\n".to_string();
    }

    let id_width = tenants.iter().map(|t| t.id.as_str().len()).max().unwrap_or(2).max(2);
    let mut output = String::new();
    output.push_str(&format!("   {:<id_width$}  {}\n", "ID", "Name", id_width = id_width));

    for tenant in tenants {
        let marker = if Some(&tenant.id) == selected { "*" } else { " " };
        output.push_str(&format!(
            " {} {:<id_width$}  {}\n",
            marker,
            tenant.id,
            tenant.name,
            id_width = id_width
        ));
    }

    output
}

pub fn format_user(user: &AuthUser, tenant_name: Option<&str>) -> String {
    let mut output = String::new();
    output.push_str(&format!("Name:    {}\n", user.name));
    output.push_str(&format!("Email:   {}\n", user.email));
    output.push_str(&format!(
        "Tenant:  {}\n",
        tenant_name.unwrap_or(user.tenant_id.as_str())
    ));
    if !user.is_active {
        output.push_str("Status:  inactive\n");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_tenant_is_marked() {
        let tenants = vec![
            Tenant {
                id: TenantId::new("home"),
                name: "Home".into(),
            },
            Tenant {
                id: TenantId::new("shop"),
                name: "Corner Shop".into(),
            },
        ];
        let out = format_tenant_list(&tenants, Some(&TenantId::new("shop")));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].starts_with("   home"));
        assert!(lines[2].starts_with(" * shop"));
    }
}
