//! Service layer for budgetdash
//!
//! Client-side logic on top of the API: pagination with supersession,
//! optimistic reclassification, and the figures derived for display.

pub mod feed;
pub mod goals;
pub mod health;
pub mod overview;
pub mod reclassify;
pub mod report;

pub use feed::{ApplyOutcome, PageRequest, Ticket, TransactionFeed};
pub use health::HealthStatus;
pub use overview::{CategoryShare, OverviewKpis};
pub use reclassify::{ReclassifyLedger, ReclassifyRequest, SettleOutcome, Settlement, Submitted};
pub use report::{CategorySpend, SpendingReport};
