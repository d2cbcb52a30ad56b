//! Set logging state machine and session result assembly.
//!
//! A set cycles through its states on successive taps:
//! NotStarted(r) -> Success(r) -> Failure(r-1) -> Failure(r-2) -> ... and
//! wraps back to NotStarted at the planned rep count once the failure reps
//! run out. An exercise's outcome is a success only when every one of its
//! sets ended in success.

use crate::types::{Exercise, ExerciseResult, SessionResult, SetOutcome, SetState};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Advance a set to its next state in the tap cycle.
///
/// `planned_reps` is the rep target the set returns to when it wraps
/// around to NotStarted.
pub fn advance(state: SetState, planned_reps: i32) -> SetState {
    match state {
        SetState::NotStarted(reps) => SetState::Success(reps),
        SetState::Success(reps) => SetState::Failure((reps - 1).max(0)),
        SetState::Failure(reps) => {
            let remaining = reps - 1;
            if remaining < 0 {
                SetState::NotStarted(planned_reps)
            } else {
                SetState::Failure(remaining)
            }
        }
    }
}

/// Mark a set failed on its first rep (the bail-out shortcut)
pub fn fail_immediately() -> SetState {
    SetState::Failure(1)
}

/// Derive the exercise-level outcome from its sets.
///
/// Success requires every set to have succeeded; an empty or unfinished
/// set list counts as a failure.
pub fn outcome_from_sets(sets: &[SetState]) -> SetOutcome {
    let succeeded = !sets.is_empty() && sets.iter().all(|s| matches!(s, SetState::Success(_)));
    SetOutcome { succeeded }
}

/// Rep counts of the sets that ended in failure
pub fn failed_reps(sets: &[SetState]) -> Vec<i32> {
    sets.iter()
        .filter_map(|s| match s {
            SetState::Failure(reps) => Some(*reps),
            _ => None,
        })
        .collect()
}

/// Snapshot an exercise and its finished sets into a result record.
///
/// Captures the weight the sets were performed at, so call this before
/// applying the outcome to the exercise's state.
pub fn result_for(exercise: &Exercise, sets: &[SetState]) -> ExerciseResult {
    let outcome = outcome_from_sets(sets);
    ExerciseResult {
        id: exercise.id,
        name: exercise.name.clone(),
        weight: exercise.state.current_weight,
        succeeded: outcome.succeeded,
        failed_reps: failed_reps(sets),
        sets_at_time: sets.len() as u32,
        reps_at_time: exercise.reps,
    }
}

/// Assemble a finished session from its per-exercise results
pub fn session_result(
    exercises: Vec<ExerciseResult>,
    performed_at: DateTime<Utc>,
    total_seconds: f64,
) -> SessionResult {
    let overall_success = !exercises.is_empty() && exercises.iter().all(|e| e.succeeded);
    SessionResult {
        id: Uuid::new_v4(),
        performed_at,
        total_seconds,
        exercises,
        overall_success,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExerciseState;

    #[test]
    fn test_tap_cycle() {
        let planned = 10;
        let mut state = SetState::NotStarted(planned);

        state = advance(state, planned);
        assert_eq!(state, SetState::Success(10));

        state = advance(state, planned);
        assert_eq!(state, SetState::Failure(9));

        state = advance(state, planned);
        assert_eq!(state, SetState::Failure(8));
    }

    #[test]
    fn test_failure_wraps_to_not_started() {
        let planned = 10;
        let mut state = SetState::Failure(0);

        state = advance(state, planned);
        assert_eq!(state, SetState::NotStarted(10));
    }

    #[test]
    fn test_success_at_zero_reps_fails_at_zero() {
        // A zero-rep set cannot lose a rep going into failure
        assert_eq!(advance(SetState::Success(0), 5), SetState::Failure(0));
    }

    #[test]
    fn test_fail_immediately() {
        assert_eq!(fail_immediately(), SetState::Failure(1));
    }

    #[test]
    fn test_outcome_requires_every_set_to_succeed() {
        let all_good = [SetState::Success(10), SetState::Success(10)];
        assert!(outcome_from_sets(&all_good).succeeded);

        let one_bad = [SetState::Success(10), SetState::Failure(6)];
        assert!(!outcome_from_sets(&one_bad).succeeded);

        let unfinished = [SetState::Success(10), SetState::NotStarted(10)];
        assert!(!outcome_from_sets(&unfinished).succeeded);

        assert!(!outcome_from_sets(&[]).succeeded);
    }

    #[test]
    fn test_failed_reps_collected_in_order() {
        let sets = [
            SetState::Success(10),
            SetState::Failure(6),
            SetState::Failure(3),
        ];
        assert_eq!(failed_reps(&sets), vec![6, 3]);
    }

    #[test]
    fn test_result_snapshots_weight_and_scheme() {
        let mut exercise = Exercise::new("Bench Press", 45.0, 10, 3);
        exercise.state = ExerciseState::new(135.0);

        let sets = [
            SetState::Success(10),
            SetState::Success(10),
            SetState::Failure(6),
        ];
        let result = result_for(&exercise, &sets);

        assert_eq!(result.weight, 135.0);
        assert!(!result.succeeded);
        assert_eq!(result.failed_reps, vec![6]);
        assert_eq!(result.sets_at_time, 3);
        assert_eq!(result.reps_at_time, 10);
        // 2 good sets x 10 reps x 135
        assert_eq!(result.volume(), 2700.0);
    }

    #[test]
    fn test_session_overall_success() {
        let exercise = Exercise::new("Row", 95.0, 8, 2);
        let good = result_for(&exercise, &[SetState::Success(8), SetState::Success(8)]);
        let bad = result_for(&exercise, &[SetState::Failure(4), SetState::Success(8)]);

        let now = Utc::now();
        let succeeded = session_result(vec![good.clone()], now, 1800.0);
        assert!(succeeded.overall_success);

        let failed = session_result(vec![good, bad], now, 1800.0);
        assert!(!failed.overall_success);
    }
}
