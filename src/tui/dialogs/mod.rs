//! Dialog modules for the TUI

pub mod filter;
pub mod help;
pub mod reclassify;
pub mod tenant;
