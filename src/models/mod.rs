//! Core data models for budgetdash
//!
//! Shapes of the data returned by the budgeting API: transactions and pages,
//! monthly reviews, savings goals, tenants and users.

pub mod category;
pub mod filters;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod review;
pub mod tenant;
pub mod transaction;

pub use category::{category_color, category_glyph};
pub use filters::TransactionFilters;
pub use goal::{GoalHistoryPoint, SavingsGoal};
pub use ids::{GoalId, TenantId, TransactionId};
pub use money::Money;
pub use period::ReviewPeriod;
pub use review::{CategoryAmount, MonthlyReview, SeriesPoint};
pub use tenant::{AuthUser, LoginResponse, Tenant};
pub use transaction::{
    ReclassifiedTransaction, TagState, Transaction, TransactionPage, USER_TAGGED,
};
