#![forbid(unsafe_code)]

//! Core domain model and business logic for the Lift workout assistant.
//!
//! This crate provides:
//! - Domain types (plates, inventories, exercises, sets, results)
//! - The progressive-overload weight adjustment engine
//! - Achievable-weight enumeration for fixed equipment
//! - Configuration and history summaries

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod rounding;
pub mod inventory;
pub mod selector;
pub mod streak;
pub mod engine;
pub mod sets;
pub mod history;

// Re-export commonly used items
pub use error::{Error, Result};
pub use types::*;
pub use config::{AdjustmentConfig, Config};
pub use engine::{apply, apply_batch, AppliedOutcome};
pub use history::{summarize, HistorySummary, HistoryWindow};
pub use inventory::{standard_inventory, SumCache};
pub use rounding::round_up_to_tolerance;
pub use selector::{next_at_or_above, next_at_or_below};
pub use streak::record_outcome;
