//! Consecutive-outcome streak tracking.
//!
//! Each exercise carries two independent counters. A success zeroes the
//! failure counter and vice versa, so only one streak is ever live. A
//! counter reaching its configured threshold fires the matching trigger
//! and resets to zero; at most one trigger fires per outcome.

use crate::config::AdjustmentConfig;
use crate::types::{ExerciseState, SetOutcome, Trigger};

/// Record one outcome against the exercise's counters.
///
/// Returns the trigger that fired, if any. Not firing is a normal result:
/// the counters moved but the weight stays where it is.
pub fn record_outcome(
    state: &mut ExerciseState,
    outcome: SetOutcome,
    config: &AdjustmentConfig,
) -> Option<Trigger> {
    if outcome.succeeded {
        state.consecutive_failures = 0;
        state.consecutive_successes += 1;
        if state.consecutive_successes >= config.increment_after_successes {
            state.consecutive_successes = 0;
            tracing::debug!("Success streak reached threshold, increment trigger fired");
            return Some(Trigger::Increment);
        }
    } else {
        state.consecutive_successes = 0;
        state.consecutive_failures += 1;
        if state.consecutive_failures >= config.decrement_after_failures {
            state.consecutive_failures = 0;
            tracing::debug!("Failure streak reached threshold, decrement trigger fired");
            return Some(Trigger::Decrement);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(successes: u32, failures: u32) -> AdjustmentConfig {
        AdjustmentConfig {
            increment_after_successes: successes,
            decrement_after_failures: failures,
            ..AdjustmentConfig::default()
        }
    }

    #[test]
    fn test_trigger_fires_at_threshold() {
        let mut state = ExerciseState::new(100.0);
        let config = config(2, 2);

        assert_eq!(record_outcome(&mut state, SetOutcome::success(), &config), None);
        assert_eq!(state.consecutive_successes, 1);

        assert_eq!(
            record_outcome(&mut state, SetOutcome::success(), &config),
            Some(Trigger::Increment)
        );
        assert_eq!(state.consecutive_successes, 0);
    }

    #[test]
    fn test_failure_resets_success_streak() {
        let mut state = ExerciseState::new(100.0);
        let config = config(3, 3);

        record_outcome(&mut state, SetOutcome::success(), &config);
        record_outcome(&mut state, SetOutcome::success(), &config);
        assert_eq!(state.consecutive_successes, 2);

        assert_eq!(record_outcome(&mut state, SetOutcome::failure(), &config), None);
        assert_eq!(state.consecutive_successes, 0);
        assert_eq!(state.consecutive_failures, 1);
    }

    #[test]
    fn test_success_resets_failure_streak() {
        let mut state = ExerciseState::new(100.0);
        let config = config(3, 3);

        record_outcome(&mut state, SetOutcome::failure(), &config);
        record_outcome(&mut state, SetOutcome::failure(), &config);
        assert_eq!(state.consecutive_failures, 2);

        record_outcome(&mut state, SetOutcome::success(), &config);
        assert_eq!(state.consecutive_failures, 0);
        assert_eq!(state.consecutive_successes, 1);
    }

    #[test]
    fn test_threshold_of_one_fires_every_time() {
        let mut state = ExerciseState::new(100.0);
        let config = config(1, 1);

        assert_eq!(
            record_outcome(&mut state, SetOutcome::success(), &config),
            Some(Trigger::Increment)
        );
        assert_eq!(
            record_outcome(&mut state, SetOutcome::failure(), &config),
            Some(Trigger::Decrement)
        );
        assert_eq!(state.consecutive_successes, 0);
        assert_eq!(state.consecutive_failures, 0);
    }

    #[test]
    fn test_seeded_counters_respected() {
        // A state loaded mid-streak fires on the outcome that completes it
        let mut state = ExerciseState::new(100.0);
        state.consecutive_successes = 4;
        let config = config(5, 3);

        assert_eq!(
            record_outcome(&mut state, SetOutcome::success(), &config),
            Some(Trigger::Increment)
        );
    }
}
