//! # alarmgrid-schema
//!
//! Predicate catalog and configuration for alarmgrid.
//!
//! This crate provides:
//! - The built-in alarm predicate catalog and base query
//! - Configuration parser for `alarmgrid.toml` files
//! - Catalog validation (unique, non-empty names and conditions)
//!
//! ## Example
//!
//! ```rust,ignore
//! use alarmgrid_schema::GridConfig;
//!
//! let config = GridConfig::from_file("alarmgrid.toml")?;
//! let catalog = config.catalog()?;
//! ```

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{ALARM_PREDICATES, BASE_QUERY, Catalog, PredicateDef, names};
pub use config::{DebugConfig, GridConfig};
pub use error::{SchemaError, SchemaResult};
