//! GraphQL access to the budgeting API

pub mod client;
pub mod queries;
pub mod response;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::BudgetClient;
pub use transport::{GraphQlRequest, HttpTransport, Transport};
