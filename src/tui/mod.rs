//! Terminal User Interface module
//!
//! This module provides the interactive dashboard using ratatui: overview,
//! transactions, savings goals, spending report and settings views, with
//! dialogs for reclassifying, filtering and switching tenants. Network calls
//! run on a background worker so the screen never blocks on the API.

pub mod app;
pub mod event;
pub mod fetch;
pub mod handler;
pub mod terminal;
pub mod virtual_list;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
