//! Storage layer for budgetdash
//!
//! The only local state is the session (auth, tenant, preferences), kept as
//! small JSON files written atomically.

pub mod file_io;

pub use file_io::{read_json, read_json_opt, remove_if_exists, write_json_atomic};
