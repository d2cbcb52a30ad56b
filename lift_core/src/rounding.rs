//! Weight rounding against the configured tolerance grid.

use crate::types::{from_centi, to_centi};
use crate::{Error, Result};

/// Round `value` up to the smallest multiple of `tolerance` at or above it.
///
/// The tolerance must be positive (and no finer than the 0.01 weight grid);
/// anything else is a configuration error, rejected before any division.
/// Non-positive values round to 0. The result satisfies
/// `value <= result < value + tolerance`, and a value already on the grid
/// is returned as-is.
pub fn round_up_to_tolerance(value: f64, tolerance: f64) -> Result<f64> {
    let tolerance_centi = to_centi(tolerance);
    if tolerance <= 0.0 || tolerance_centi == 0 {
        return Err(Error::InvalidTolerance { tolerance });
    }
    if value <= 0.0 {
        return Ok(0.0);
    }

    let steps = to_centi(value).div_ceil(tolerance_centi);
    Ok(from_centi(steps * tolerance_centi))
}
