//! GraphQL documents sent to the budgeting API

pub const HEALTH_CHECK: &str = "query HealthCheck { healthCheck }";

pub const TENANTS: &str = "query GetTenants { tenants { id name } }";

pub const MONTHLY_REVIEW: &str = r#"
query Overview($tenantId: ID!, $month: Int!, $year: Int!) {
  monthlyReview(tenantId: $tenantId, month: $month, year: $year) {
    totalIncome
    totalExpenses
    savings
    categoryBreakdown { name amount }
    series { date budget actual }
  }
}
"#;

pub const TRANSACTIONS: &str = r#"
query Transactions($tenantId: ID!, $filters: TxFilters, $cursor: String) {
  transactions(tenantId: $tenantId, filters: $filters, cursor: $cursor) {
    items {
      id
      date
      description
      amount
      currency
      category
      taggedBy
    }
    cursor
  }
}
"#;

pub const SAVINGS_GOALS: &str = r#"
query SavingsGoals($tenantId: ID!) {
  savingsGoals(tenantId: $tenantId) {
    id
    name
    target
    current
    deadline
    history { date value }
  }
}
"#;

pub const LOGIN: &str = r#"
mutation Login($email: String!, $password: String!, $tenantId: TenantType!) {
  login(input: { email: $email, password: $password, tenantId: $tenantId }) {
    token
    user { email name tenantId isActive }
  }
}
"#;

pub const RECLASSIFY: &str = r#"
mutation Reclassify($tenantId: ID!, $id: ID!, $category: String!) {
  reclassifyTransaction(tenantId: $tenantId, id: $id, category: $category) {
    id
    category
    taggedBy
  }
}
"#;
