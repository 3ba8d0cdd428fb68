//! budgetdash - terminal dashboard for a household budgeting API
//!
//! This library provides the core functionality for the budgetdash CLI and
//! TUI. Data lives on a remote GraphQL server; the client keeps only a small
//! session (token, selected tenant, dashboard preferences) on disk.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: env_logger setup for the CLI and TUI
//! - `models`: Data models returned by the API
//! - `storage`: Atomic JSON file I/O
//! - `session`: Persisted auth, tenant selection and preferences
//! - `api`: GraphQL documents, transport and typed client
//! - `services`: Pagination, optimistic reclassification, KPIs and reports
//! - `export`: CSV, JSON and YAML transaction export
//! - `display`: Plain-text formatting for CLI output
//! - `cli`: Command handlers
//! - `tui`: Interactive dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use budgetdash::api::BudgetClient;
//! use budgetdash::config::{DashPaths, Settings};
//! use budgetdash::session::Session;
//!
//! let paths = DashPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let session = Session::load(&paths)?;
//! let client = BudgetClient::from_settings(&settings, session.token())?;
//! let tenants = client.tenants()?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;
pub mod tui;

pub use error::{DashError, DashResult};
