//! Core domain types for the Lift workout assistant.
//!
//! This module defines the fundamental types used throughout the system:
//! - Plates and equipment inventories
//! - Achievable weight sets derived from an inventory
//! - Exercises, set states, and outcomes
//! - Adjustment reports and session results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Weights are carried as `f64` at the API surface but compared on a
/// 0.01-unit grid, so float noise can never split equal sums or miss an
/// exact match. Inputs finer than the grid are rejected at validation time.
pub(crate) fn to_centi(weight: f64) -> u64 {
    (weight * 100.0).round() as u64
}

pub(crate) fn from_centi(centi: u64) -> f64 {
    centi as f64 / 100.0
}

// ============================================================================
// Equipment Types
// ============================================================================

/// Unit the user tracks weights in (label preference only)
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    Lbs,
    Kg,
}

/// One plate (or dumbbell) entry in an equipment inventory
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlateSpec {
    pub weight: f64,
    pub count: u32,
}

/// A validated multiset of plates the user owns.
///
/// Construction merges duplicate weights by summing their counts, so
/// capacity is never double-counted and the content hash is canonical.
/// See `inventory` for construction and the reachable-sum enumeration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<PlateSpec>", into = "Vec<PlateSpec>")]
pub struct Inventory {
    pub(crate) plates: Vec<PlateSpec>,
}

/// Sorted, de-duplicated set of weights assemblable from an inventory.
///
/// Derived, never stored: recompute (or hit the `SumCache`) whenever the
/// inventory changes. Never contains zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AchievableWeightSet {
    pub(crate) centi: Vec<u64>,
}

impl AchievableWeightSet {
    pub(crate) fn from_centi(centi: Vec<u64>) -> Self {
        debug_assert!(centi.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(!centi.contains(&0));
        Self { centi }
    }

    pub fn len(&self) -> usize {
        self.centi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centi.is_empty()
    }

    /// All achievable weights, ascending
    pub fn weights(&self) -> Vec<f64> {
        self.centi.iter().copied().map(from_centi).collect()
    }

    pub fn min(&self) -> Option<f64> {
        self.centi.first().copied().map(from_centi)
    }

    pub fn max(&self) -> Option<f64> {
        self.centi.last().copied().map(from_centi)
    }

    pub fn contains(&self, weight: f64) -> bool {
        self.centi.binary_search(&to_centi(weight)).is_ok()
    }
}

// ============================================================================
// Exercise and Set Types
// ============================================================================

/// Per-exercise adjustment state: the working weight, the streak counters,
/// and the optional equipment inventory constraining achievable weights.
///
/// Mutated only by the adjustment engine, once per recorded outcome.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseState {
    pub current_weight: f64,
    #[serde(default)]
    pub consecutive_successes: u32,
    #[serde(default)]
    pub consecutive_failures: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Inventory>,
}

impl ExerciseState {
    /// Fresh state at a starting weight, no streaks, continuous mode
    pub fn new(starting_weight: f64) -> Self {
        Self {
            current_weight: starting_weight.max(0.0),
            consecutive_successes: 0,
            consecutive_failures: 0,
            inventory: None,
        }
    }

    /// Fresh state constrained to a fixed equipment inventory
    pub fn with_inventory(starting_weight: f64, inventory: Inventory) -> Self {
        Self {
            inventory: Some(inventory),
            ..Self::new(starting_weight)
        }
    }
}

/// A planned exercise: identity, rep scheme, and adjustment state
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub reps: i32,
    pub set_count: u32,
    pub state: ExerciseState,
}

impl Exercise {
    pub fn new(name: impl Into<String>, starting_weight: f64, reps: i32, set_count: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            reps,
            set_count,
            state: ExerciseState::new(starting_weight),
        }
    }
}

/// State of a single logged set, tagged with its rep count.
///
/// Always this tagged variant, never a bare string: illegal states are
/// unrepresentable. See `sets` for the tap-cycle transitions.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "reps", rename_all = "snake_case")]
pub enum SetState {
    NotStarted(i32),
    Success(i32),
    Failure(i32),
}

impl SetState {
    pub fn reps(&self) -> i32 {
        match self {
            SetState::NotStarted(r) | SetState::Success(r) | SetState::Failure(r) => *r,
        }
    }
}

/// Outcome of one exercise's completed session
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetOutcome {
    pub succeeded: bool,
}

impl SetOutcome {
    pub fn success() -> Self {
        Self { succeeded: true }
    }

    pub fn failure() -> Self {
        Self { succeeded: false }
    }
}

// ============================================================================
// Adjustment Report Types
// ============================================================================

/// Which streak threshold fired for a single outcome
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Increment,
    Decrement,
}

/// What the engine did with one outcome.
///
/// `fallback` is set when a trigger fired but no achievable weight
/// satisfied it, so the weight was left unchanged. That is informational,
/// never an error.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Adjustment {
    pub previous_weight: f64,
    pub new_weight: f64,
    pub trigger: Option<Trigger>,
    pub fallback: bool,
}

impl Adjustment {
    pub fn changed(&self) -> bool {
        to_centi(self.previous_weight) != to_centi(self.new_weight)
    }
}

// ============================================================================
// Session Result Types
// ============================================================================

/// Snapshot of one exercise's result within a finished session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseResult {
    pub id: Uuid,
    pub name: String,
    pub weight: f64,
    pub succeeded: bool,
    pub failed_reps: Vec<i32>,
    pub sets_at_time: u32,
    pub reps_at_time: i32,
}

impl ExerciseResult {
    /// Weight moved by the successful sets of this result.
    ///
    /// Results recorded before set/rep snapshots existed carry zeros and
    /// contribute nothing.
    pub fn volume(&self) -> f64 {
        if self.sets_at_time == 0 || self.reps_at_time <= 0 {
            return 0.0;
        }
        let successful_sets = self.sets_at_time.saturating_sub(self.failed_reps.len() as u32);
        f64::from(successful_sets) * f64::from(self.reps_at_time) * self.weight
    }
}

/// A finished session across all of its exercises
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionResult {
    pub id: Uuid,
    pub performed_at: DateTime<Utc>,
    pub total_seconds: f64,
    pub exercises: Vec<ExerciseResult>,
    pub overall_success: bool,
}
