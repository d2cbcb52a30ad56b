//! Nearest achievable weight selection.
//!
//! Ordered lookups against an achievable-weight set: the smallest member at
//! or above a target, or the largest member at or below it. Equality is an
//! immediate match. `None` means nothing qualifies; the adjustment engine
//! turns that into the leave-weight-unchanged fallback.

use crate::types::{from_centi, to_centi, AchievableWeightSet};

/// Smallest achievable weight at or above `target`
pub fn next_at_or_above(target: f64, set: &AchievableWeightSet) -> Option<f64> {
    let target = to_centi(target.max(0.0));
    let idx = set.centi.partition_point(|&w| w < target);
    set.centi.get(idx).copied().map(from_centi)
}

/// Largest achievable weight at or below `target`
pub fn next_at_or_below(target: f64, set: &AchievableWeightSet) -> Option<f64> {
    let target = to_centi(target.max(0.0));
    let idx = set.centi.partition_point(|&w| w <= target);
    idx.checked_sub(1)
        .and_then(|i| set.centi.get(i))
        .copied()
        .map(from_centi)
}
