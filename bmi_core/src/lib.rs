#![forbid(unsafe_code)]

//! Core domain model and business logic for the BMI calculator.
//!
//! This crate provides:
//! - Domain types (units, input, categories, records)
//! - Input validation and unit conversion
//! - BMI computation and classification
//! - Category display catalog
//! - Analytics event log, history and CSV archival
//! - User preferences and configuration

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod units;
pub mod validate;
pub mod engine;
pub mod analytics;
pub mod csv_rollup;
pub mod history;
pub mod state;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use analytics::{EventSink, JsonlSink};
pub use history::{category_counts, load_recent_records};
pub use validate::validate;
pub use engine::{classify, compute_bmi, evaluate, round_display, BmiAssessment, Evaluation};
