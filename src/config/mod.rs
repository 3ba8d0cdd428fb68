//! Configuration module for budgetdash
//!
//! - Platform path resolution
//! - Settings persistence (endpoint, API key, logging, UI tuning)

pub mod paths;
pub mod settings;

pub use paths::DashPaths;
pub use settings::Settings;
