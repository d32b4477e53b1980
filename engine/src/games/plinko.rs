//! Plinko engine.
//!
//! Canonical discrete model: 12 rows of fair left/right decisions over
//! 17 buckets. The ball starts at the chosen position (default center)
//! and moves one bucket per row, clamped to the board. The recorded
//! path and final bucket are authoritative: any physics animation on
//! the client must be choreographed to land in that bucket, never the
//! reverse.
//!
//! Each risk tier maps bucket index to a multiplier (basis points).
//! The tables are symmetric around the center bucket, grow more
//! extreme with risk, and each has expected value below 1 against the
//! clamped-walk bucket distribution, so the tier itself carries the
//! house edge.

use velvet_types::{
    BetRequest, Choice, HouseRules, OutcomeData, PlinkoData, RiskLevel, RoundOutcome,
    MULTIPLIER_SCALE,
};

use crate::error::EngineError;
use crate::rng::GameRng;
use crate::selector::biased_coin;

use super::OutcomeEngine;

/// Peg rows the ball falls through.
const ROWS: usize = 12;

/// Multiplier buckets along the bottom.
pub(crate) const BUCKET_COUNT: u8 = 17;

/// Default drop position when the player does not pick one.
const CENTER: u8 = 8;

/// Bucket multipliers per risk tier, in basis points.
///
/// Expected values against the clamped 12-row walk from center:
/// low 0.91, medium 0.90, high 0.88.
fn multiplier_table(risk: RiskLevel) -> &'static [u64; BUCKET_COUNT as usize] {
    match risk {
        RiskLevel::Low => &[
            0, 2_000, 5_000, 7_000, 9_000, 10_000, 10_000, 10_000, 11_000, 10_000, 10_000, 10_000,
            9_000, 7_000, 5_000, 2_000, 0,
        ],
        RiskLevel::Medium => &[
            30_000, 15_000, 3_000, 5_000, 7_000, 7_000, 8_000, 10_000, 12_000, 10_000, 8_000,
            7_000, 7_000, 5_000, 3_000, 15_000, 30_000,
        ],
        RiskLevel::High => &[
            100_000, 40_000, 10_000, 4_000, 2_000, 2_000, 3_000, 5_000, 10_000, 5_000, 3_000,
            2_000, 2_000, 4_000, 10_000, 40_000, 100_000,
        ],
    }
}

/// Win amount for a stake and bucket multiplier, rounded to the
/// nearest chip.
fn win_for(amount: u64, multiplier_bps: u64) -> u64 {
    let scaled = (amount as u128) * (multiplier_bps as u128) + (MULTIPLIER_SCALE as u128) / 2;
    (scaled / MULTIPLIER_SCALE as u128) as u64
}

pub struct Plinko;

impl OutcomeEngine for Plinko {
    fn play(
        bet: &BetRequest,
        _rules: &HouseRules,
        rng: &mut GameRng,
    ) -> Result<RoundOutcome, EngineError> {
        let Choice::Plinko {
            risk_level,
            start_position,
        } = &bet.choice
        else {
            return Err(EngineError::IllegalAction("expected a plinko choice"));
        };

        let start = start_position.unwrap_or(CENTER);
        if start >= BUCKET_COUNT {
            return Err(EngineError::IllegalAction(
                "plinko start position out of range",
            ));
        }

        // Fair random walk: one left/right decision per row, clamped
        // to the board.
        let mut position = start;
        let mut path = Vec::with_capacity(ROWS);
        for _ in 0..ROWS {
            if biased_coin(rng, 0.5)? {
                position = (position + 1).min(BUCKET_COUNT - 1);
            } else {
                position = position.saturating_sub(1);
            }
            path.push(position);
        }

        let multiplier_bps = multiplier_table(*risk_level)[position as usize];
        let win_amount = win_for(bet.amount, multiplier_bps);
        let is_win = win_amount > bet.amount;

        Ok(RoundOutcome {
            is_win,
            total_staked: bet.amount,
            win_amount,
            multiplier_bps,
            data: OutcomeData::Plinko(PlinkoData {
                risk_level: *risk_level,
                path,
                bucket: position,
            }),
        })
    }
}
