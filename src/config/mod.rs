//! Configuration module
//!
//! Fixed configuration surface of the table controller: validation
//! thresholds, table behavior (page sizes, sortable columns), and the
//! remote source URL.

pub mod config;

pub use config::TableConfig;
