//! Weight adjustment engine.
//!
//! The orchestrator for progressive overload: one recorded outcome for one
//! exercise goes in, the exercise's updated state comes out. Streak
//! counters decide whether anything happens; when a trigger fires the new
//! weight comes from either the rounding grid (continuous mode) or the
//! nearest achievable weight in the exercise's equipment inventory
//! (discrete mode).
//!
//! Everything here is deterministic and free of I/O. Callers own
//! persistence: apply a whole session with [`apply_batch`], then commit
//! the returned states in one transaction.

use crate::config::AdjustmentConfig;
use crate::inventory::SumCache;
use crate::types::{Adjustment, ExerciseState, SetOutcome, Trigger};
use crate::{rounding, selector, streak, Result};
use serde::{Deserialize, Serialize};

/// One exercise's updated state plus a report of what happened to it
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AppliedOutcome {
    pub state: ExerciseState,
    pub adjustment: Adjustment,
}

/// Apply one outcome to one exercise.
///
/// Updates the streak counters and, if a threshold fired, moves
/// `current_weight` to the next target:
/// - increment: current + increment amount, then up to the rounding grid
///   or to the smallest achievable weight at or above the target
/// - decrement: fixed subtraction or proportional cut (clamped to zero),
///   then to the grid or to the largest achievable weight at or below
///   the target
///
/// When an inventory is present but cannot satisfy the target, the weight
/// stays where it was and the returned [`Adjustment`] marks the fallback.
/// Configuration errors are returned before any state is modified.
pub fn apply(
    state: &mut ExerciseState,
    outcome: SetOutcome,
    config: &AdjustmentConfig,
) -> Result<Adjustment> {
    config.validate()?;
    let mut cache = SumCache::new();
    apply_validated(state, outcome, config, &mut cache)
}

/// Apply one outcome per exercise and collect the updated states.
///
/// The config is validated once up front: a configuration error blocks the
/// whole batch with no partial update. Reachable-sum sets are shared
/// across exercises through one cache, so a session full of exercises on
/// the same equipment enumerates it once. The caller commits the returned
/// states transactionally.
pub fn apply_batch(
    pairs: Vec<(ExerciseState, SetOutcome)>,
    config: &AdjustmentConfig,
) -> Result<Vec<AppliedOutcome>> {
    config.validate()?;
    let mut cache = SumCache::new();

    let mut applied = Vec::with_capacity(pairs.len());
    for (mut state, outcome) in pairs {
        let adjustment = apply_validated(&mut state, outcome, config, &mut cache)?;
        applied.push(AppliedOutcome { state, adjustment });
    }

    tracing::info!(
        "Applied {} outcomes ({} weight changes)",
        applied.len(),
        applied.iter().filter(|a| a.adjustment.changed()).count()
    );
    Ok(applied)
}

/// Adjustment body; the config is already validated.
fn apply_validated(
    state: &mut ExerciseState,
    outcome: SetOutcome,
    config: &AdjustmentConfig,
    cache: &mut SumCache,
) -> Result<Adjustment> {
    let previous_weight = state.current_weight;

    let Some(trigger) = streak::record_outcome(state, outcome, config) else {
        return Ok(Adjustment {
            previous_weight,
            new_weight: previous_weight,
            trigger: None,
            fallback: false,
        });
    };

    let raw_target = match trigger {
        Trigger::Increment => previous_weight + config.increment_amount,
        Trigger::Decrement => {
            let raw = if config.use_proportional_decrement {
                previous_weight * (config.decrement_percentage / 100.0)
            } else {
                previous_weight - config.fixed_decrement_amount
            };
            raw.max(0.0)
        }
    };

    let (new_weight, fallback) = match state.inventory.as_ref().filter(|inv| !inv.is_empty()) {
        Some(inventory) => {
            let set = cache.reachable(inventory);
            let candidate = match trigger {
                Trigger::Increment => selector::next_at_or_above(raw_target, set),
                Trigger::Decrement => selector::next_at_or_below(raw_target, set),
            };
            match candidate {
                Some(weight) => (weight, false),
                None => {
                    tracing::info!(
                        "No achievable weight toward {:?} target {}, keeping {}",
                        trigger,
                        raw_target,
                        previous_weight
                    );
                    (previous_weight, true)
                }
            }
        }
        None => (
            rounding::round_up_to_tolerance(raw_target, config.rounding_tolerance)?,
            false,
        ),
    };

    state.current_weight = new_weight;
    tracing::debug!(
        "{:?} trigger: {} -> {} (raw target {})",
        trigger,
        previous_weight,
        new_weight,
        raw_target
    );

    Ok(Adjustment {
        previous_weight,
        new_weight,
        trigger: Some(trigger),
        fallback,
    })
}
