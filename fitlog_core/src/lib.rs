#![forbid(unsafe_code)]

//! Core domain model and business logic for fitlog.
//!
//! This crate provides:
//! - Domain types (workouts, strength logs, meals, profile)
//! - The record store (JSON persistence with atomic writes)
//! - Derived metrics (BMI, weekly/monthly rollups, macro splits)
//! - Export and reset utilities
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod store;
pub mod metrics;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use store::{RecordStore, Snapshot};
pub use metrics::BmiCategory;
pub use export::{clear_collection, export_all, export_csv, write_export};
