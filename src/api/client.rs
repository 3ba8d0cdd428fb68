//! Typed client for the budgeting API
//!
//! Each method maps to exactly one GraphQL operation. The client holds the
//! bearer token; the transport decides how bytes move.

use serde_json::json;
use zeroize::Zeroizing;

use super::queries;
use super::response::{require_field, take_field};
use super::transport::{GraphQlRequest, HttpTransport, Transport};
use crate::config::Settings;
use crate::error::{DashError, DashResult};
use crate::models::{
    LoginResponse, MonthlyReview, ReclassifiedTransaction, ReviewPeriod, SavingsGoal, Tenant,
    TenantId, TransactionFilters, TransactionId, TransactionPage,
};

pub struct BudgetClient<T: Transport = HttpTransport> {
    transport: T,
    token: Option<Zeroizing<String>>,
}

impl BudgetClient<HttpTransport> {
    /// Client talking HTTP to the configured endpoint
    pub fn from_settings(settings: &Settings, token: Option<&str>) -> DashResult<Self> {
        let transport = HttpTransport::new(settings)?;
        Ok(Self::new(transport).with_token(token))
    }
}

impl<T: Transport> BudgetClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.set_token(token);
        self
    }

    pub fn set_token(&mut self, token: Option<&str>) {
        self.token = token
            .filter(|t| !t.trim().is_empty())
            .map(|t| Zeroizing::new(t.to_string()));
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn run(&self, request: GraphQlRequest) -> DashResult<serde_json::Value> {
        self.transport
            .execute(&request, self.token.as_ref().map(|t| t.as_str()))
    }

    /// Pre-flight reachability check
    pub fn health_check(&self) -> DashResult<Option<String>> {
        let mut data = self.run(GraphQlRequest::new(
            "HealthCheck",
            queries::HEALTH_CHECK,
            json!({}),
        ))?;
        take_field(&mut data, "healthCheck")
    }

    pub fn tenants(&self) -> DashResult<Vec<Tenant>> {
        let mut data = self.run(GraphQlRequest::new("GetTenants", queries::TENANTS, json!({})))?;
        take_field(&mut data, "tenants")
    }

    /// Aggregates for one month; a null review reads as all zeros
    pub fn monthly_review(
        &self,
        tenant: &TenantId,
        period: ReviewPeriod,
    ) -> DashResult<MonthlyReview> {
        let mut data = self.run(GraphQlRequest::new(
            "Overview",
            queries::MONTHLY_REVIEW,
            json!({
                "tenantId": tenant,
                "month": period.month,
                "year": period.year,
            }),
        ))?;
        take_field(&mut data, "monthlyReview")
    }

    /// One page of transactions; `cursor` is `None` for the first page
    pub fn transactions_page(
        &self,
        tenant: &TenantId,
        filters: &TransactionFilters,
        cursor: Option<&str>,
    ) -> DashResult<TransactionPage> {
        let mut data = self.run(GraphQlRequest::new(
            "Transactions",
            queries::TRANSACTIONS,
            json!({
                "tenantId": tenant,
                "filters": filters,
                "cursor": cursor,
            }),
        ))?;
        take_field(&mut data, "transactions")
    }

    pub fn savings_goals(&self, tenant: &TenantId) -> DashResult<Vec<SavingsGoal>> {
        let mut data = self.run(GraphQlRequest::new(
            "SavingsGoals",
            queries::SAVINGS_GOALS,
            json!({ "tenantId": tenant }),
        ))?;
        take_field(&mut data, "savingsGoals")
    }

    /// Exchange credentials for a token. Does not store the token.
    pub fn login(
        &self,
        email: &str,
        password: &Zeroizing<String>,
        tenant: &TenantId,
    ) -> DashResult<LoginResponse> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(DashError::Validation(
                "Email and password are required.".into(),
            ));
        }

        let request = GraphQlRequest::new(
            "Login",
            queries::LOGIN,
            json!({
                "email": email.trim(),
                "password": password.as_str(),
                "tenantId": tenant,
            }),
        );
        let mut data = self.transport.execute(&request, None)?;
        let response: LoginResponse = require_field(&mut data, "login")?;

        if response.token.trim().is_empty() {
            return Err(DashError::Unauthenticated(
                "Missing token in response. Please try again.".into(),
            ));
        }
        Ok(response)
    }

    pub fn reclassify(
        &self,
        tenant: &TenantId,
        id: &TransactionId,
        category: &str,
    ) -> DashResult<ReclassifiedTransaction> {
        let mut data = self.run(GraphQlRequest::new(
            "Reclassify",
            queries::RECLASSIFY,
            json!({
                "tenantId": tenant,
                "id": id,
                "category": category,
            }),
        ))?;
        require_field(&mut data, "reclassifyTransaction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedTransport;
    use crate::models::Money;

    fn tenant() -> TenantId {
        TenantId::new("home")
    }

    #[test]
    fn test_token_is_forwarded() {
        let transport = ScriptedTransport::new().reply(json!({"tenants": []}));
        let client = BudgetClient::new(transport).with_token(Some("jwt.abc"));

        client.tenants().unwrap();
        let requests = client.transport().requests();
        assert_eq!(requests[0].token.as_deref(), Some("jwt.abc"));
    }

    #[test]
    fn test_transactions_page_variables() {
        let transport = ScriptedTransport::new().reply(json!({
            "transactions": {
                "items": [{"id": "t1", "date": "2025-04-01", "amount": -20.0, "category": "Food"}],
                "cursor": "c2"
            }
        }));
        let client = BudgetClient::new(transport);
        let filters = TransactionFilters::for_period(ReviewPeriod::new(2025, 4).unwrap())
            .with_category(Some("Food".into()));

        let page = client
            .transactions_page(&tenant(), &filters, Some("c1"))
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].amount, Money::from_cents(-2000));
        assert_eq!(page.cursor.as_deref(), Some("c2"));

        let vars = &client.transport().requests()[0].variables;
        assert_eq!(vars["tenantId"], "home");
        assert_eq!(vars["cursor"], "c1");
        assert_eq!(vars["filters"], json!({"year": 2025, "month": 4, "category": "Food"}));
    }

    #[test]
    fn test_first_page_sends_null_cursor() {
        let transport =
            ScriptedTransport::new().reply(json!({"transactions": {"items": [], "cursor": null}}));
        let client = BudgetClient::new(transport);
        let filters = TransactionFilters::for_period(ReviewPeriod::new(2025, 4).unwrap());

        let page = client.transactions_page(&tenant(), &filters, None).unwrap();
        assert!(page.items.is_empty());
        assert!(page.is_last());
        assert!(client.transport().requests()[0].variables["cursor"].is_null());
    }

    #[test]
    fn test_null_review_reads_as_zero() {
        let transport = ScriptedTransport::new().reply(json!({"monthlyReview": null}));
        let client = BudgetClient::new(transport);
        let review = client
            .monthly_review(&tenant(), ReviewPeriod::new(2025, 4).unwrap())
            .unwrap();
        assert_eq!(review, MonthlyReview::default());
    }

    #[test]
    fn test_login_rejects_missing_token() {
        let transport = ScriptedTransport::new().reply(json!({
            "login": {"token": "", "user": {"email": "a@b.c", "name": "A"}}
        }));
        let client = BudgetClient::new(transport);
        let err = client
            .login("a@b.c", &Zeroizing::new("pw".into()), &TenantId::new("PERSONAL"))
            .unwrap_err();
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_login_validates_input_without_network() {
        let client = BudgetClient::new(ScriptedTransport::new());
        let err = client
            .login(" ", &Zeroizing::new(String::new()), &tenant())
            .unwrap_err();
        assert!(err.is_validation());
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn test_reclassify_returns_server_triple() {
        let transport = ScriptedTransport::new().reply(json!({
            "reclassifyTransaction": {"id": "t1", "category": "Travel", "taggedBy": "user"}
        }));
        let client = BudgetClient::new(transport).with_token(Some("jwt"));
        let result = client
            .reclassify(&tenant(), &TransactionId::new("t1"), "Travel")
            .unwrap();
        assert_eq!(result.category, "Travel");
        assert_eq!(result.tagged_by.as_deref(), Some("user"));
    }

    #[test]
    fn test_errors_propagate() {
        let transport = ScriptedTransport::new().fail(DashError::Http {
            status: 403,
            message: "Forbidden".into(),
        });
        let client = BudgetClient::new(transport);
        assert!(client.health_check().unwrap_err().is_forbidden());
    }
}
