//! Filesystem layer for rail-sync
//!
//! Enumerates on-disk test files (recursive walk or flat glob listing),
//! resolves absolute paths, and loads typed option structs from
//! TOML/JSON/YAML files.

pub mod config;
pub mod error;
pub mod path;
pub mod scan;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{absolute, base_name};
pub use scan::{ScanOptions, scan_files};
