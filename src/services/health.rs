//! Pre-flight health gate
//!
//! The health check runs before anything else. A 403 almost always means the
//! deployment expects an API key; every other failure is a connection error.

use crate::api::{BudgetClient, Transport};
use crate::error::DashError;

pub const FORBIDDEN_MESSAGE: &str = "Forbidden (403): The API rejected the request. If your API \
requires an API key or auth on healthCheck, set BUDGETDASH_API_KEY (or api_key in config.json) \
or adjust auth to allow health checks.";

pub const UNREACHABLE_TITLE: &str = "Connection Error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy(Option<String>),
    Forbidden,
    Unreachable(String),
}

impl HealthStatus {
    pub fn classify(result: Result<Option<String>, DashError>) -> Self {
        match result {
            Ok(message) => Self::Healthy(message),
            Err(e) if e.is_forbidden() => Self::Forbidden,
            Err(e) => Self::Unreachable(e.to_string()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy(_))
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Healthy(_) => "API reachable",
            Self::Forbidden => "Forbidden",
            Self::Unreachable(_) => UNREACHABLE_TITLE,
        }
    }

    /// What the user should read
    pub fn message(&self) -> String {
        match self {
            Self::Healthy(Some(msg)) => msg.clone(),
            Self::Healthy(None) => "ok".to_string(),
            Self::Forbidden => FORBIDDEN_MESSAGE.to_string(),
            Self::Unreachable(detail) => detail.clone(),
        }
    }
}

pub fn check<T: Transport>(client: &BudgetClient<T>) -> HealthStatus {
    let status = HealthStatus::classify(client.health_check());
    match &status {
        HealthStatus::Healthy(_) => log::info!("Health check passed"),
        other => log::warn!("Health check failed: {}", other.message()),
    }
    status
}
