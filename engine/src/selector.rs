//! Weighted random selection.
//!
//! Weights are relative, need not sum to anything in particular, and
//! may be zero (a zero-weight entry is never selected). All weights
//! zero is a configuration fault, not a silent fallback; callers must
//! guarantee at least one positive weight.

use crate::error::EngineError;
use crate::rng::GameRng;

/// Select one entry from `(value, weight)` pairs. Draws uniformly in
/// `[0, total_weight)` and returns the first entry whose cumulative
/// weight exceeds the draw, so long-run frequencies match the weights.
pub fn pick_weighted<'a, T>(
    rng: &mut GameRng,
    outcomes: &'a [(T, u64)],
) -> Result<&'a T, EngineError> {
    let mut total: u64 = 0;
    for (_, weight) in outcomes {
        total = total
            .checked_add(*weight)
            .ok_or(EngineError::InvalidConfiguration("total weight overflows"))?;
    }
    if total == 0 {
        return Err(EngineError::InvalidConfiguration(
            "weighted selection requires a positive total weight",
        ));
    }

    let draw = rng.next_bounded_u64(total);
    let mut cumulative = 0u64;
    for (value, weight) in outcomes {
        cumulative += weight;
        if draw < cumulative {
            return Ok(value);
        }
    }
    // draw < total == the final cumulative weight, so the loop returned.
    Err(EngineError::InvalidConfiguration(
        "weighted selection fell through",
    ))
}

/// Boolean draw that is `true` with probability `win_probability`.
pub fn biased_coin(rng: &mut GameRng, win_probability: f64) -> Result<bool, EngineError> {
    if !(0.0..=1.0).contains(&win_probability) {
        return Err(EngineError::InvalidConfiguration(
            "win probability must be within [0, 1]",
        ));
    }
    Ok(rng.next_f64() < win_probability)
}
