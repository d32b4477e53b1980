//! Slot machine engine.
//!
//! Five reels, three visible rows. Every position is drawn
//! independently by the weighted selector over the symbol table, so
//! commoner symbols are worth less. The wild is the single
//! highest-value symbol and substitutes for any other when matching.
//!
//! Lines (by `active_lines`):
//! - 1: middle row
//! - 3: adds top and bottom rows
//! - 5: adds the two three-reel diagonals
//!
//! A line pays on a run of at least 3 consecutive matching-or-wild
//! symbols starting from reel 0:
//! `bet x symbol_value x (run - 2) x house_adjustment`, diagonals
//! x1.5 on top. The house adjustment is `1 - house_edge` from the
//! current rules; this is the engine where the configured edge enters
//! the math directly. A full grid of wilds pays the fixed jackpot
//! instead of the line total.

use velvet_types::{
    BetRequest, Choice, HouseRules, OutcomeData, RoundOutcome, SlotsData, WinningLine,
    MULTIPLIER_SCALE,
};

use crate::error::EngineError;
use crate::rng::GameRng;
use crate::selector::pick_weighted;

use super::OutcomeEngine;

/// Reels on the machine.
pub(crate) const REEL_COUNT: usize = 5;

/// Visible rows per reel.
pub(crate) const ROW_COUNT: usize = 3;

/// Fixed jackpot payout, in chips.
pub(crate) const JACKPOT_AMOUNT: u64 = 25_000;

/// Diagonal lines pay half again as much as horizontal ones.
const DIAGONAL_BONUS_BPS: u64 = 15_000;

/// One entry on the symbol strip.
struct SlotSymbol {
    id: u8,
    name: &'static str,
    /// Line value in basis points (cherry 1.0x .. wild 10.0x).
    value_bps: u64,
    /// Relative draw frequency.
    weight: u64,
}

/// The symbol table. Weights skew toward the cheap symbols; the wild
/// is the rarest and the most valuable.
const SYMBOLS: [SlotSymbol; 8] = [
    SlotSymbol { id: 0, name: "Cherry", value_bps: 10_000, weight: 28 },
    SlotSymbol { id: 1, name: "Lemon", value_bps: 15_000, weight: 24 },
    SlotSymbol { id: 2, name: "Orange", value_bps: 20_000, weight: 18 },
    SlotSymbol { id: 3, name: "Plum", value_bps: 25_000, weight: 14 },
    SlotSymbol { id: 4, name: "Bell", value_bps: 30_000, weight: 9 },
    SlotSymbol { id: 5, name: "Seven", value_bps: 50_000, weight: 5 },
    SlotSymbol { id: 6, name: "Bar", value_bps: 70_000, weight: 3 },
    SlotSymbol { id: 7, name: "Wild", value_bps: 100_000, weight: 1 },
];

/// The wild symbol's id.
pub(crate) const WILD_ID: u8 = 7;

/// Display name for a symbol id, for UI callers mapping result grids
/// to art assets.
pub fn symbol_name(id: u8) -> &'static str {
    SYMBOLS
        .iter()
        .find(|symbol| symbol.id == id)
        .map(|symbol| symbol.name)
        .unwrap_or("?")
}

fn symbol_value_bps(id: u8) -> u64 {
    SYMBOLS
        .iter()
        .find(|symbol| symbol.id == id)
        .map(|symbol| symbol.value_bps)
        .unwrap_or(0)
}

/// Positions of each line as `(reel, row)` pairs. Lines 4 and 5 are
/// the three-reel diagonals.
fn line_positions(line: u8) -> &'static [(usize, usize)] {
    match line {
        1 => &[(0, 1), (1, 1), (2, 1), (3, 1), (4, 1)],
        2 => &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)],
        3 => &[(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)],
        4 => &[(0, 0), (1, 1), (2, 2)],
        5 => &[(0, 2), (1, 1), (2, 0)],
        _ => &[],
    }
}

/// Lines checked for a given active-line selection. The middle row is
/// always live; 3 adds the other rows, 5 adds the diagonals.
fn active_line_numbers(active_lines: u8) -> &'static [u8] {
    match active_lines {
        1 | 2 => &[1],
        3 | 4 => &[1, 2, 3],
        _ => &[1, 2, 3, 4, 5],
    }
}

/// Longest run of symbols matching the first line symbol (or wild)
/// from reel 0. Returns `(line symbol, run length)` when the run pays.
fn line_run(symbols: &[u8]) -> Option<(u8, u8)> {
    let first = *symbols.first()?;
    let mut run = 1u8;
    for &symbol in &symbols[1..] {
        if symbol == first || symbol == WILD_ID {
            run += 1;
        } else {
            break;
        }
    }
    (run >= 3).then_some((first, run))
}

/// Evaluate a stopped grid. Returns the paying lines, the total win,
/// and whether the grid is the jackpot pattern. Pure so the payline
/// math is testable without randomness.
pub(crate) fn evaluate_spin(
    grid: &[[u8; ROW_COUNT]; REEL_COUNT],
    active_lines: u8,
    bet_amount: u64,
    house_adjustment_bps: u64,
) -> (Vec<WinningLine>, u64, bool) {
    // Jackpot: every visible position is the wild.
    let is_jackpot = grid
        .iter()
        .all(|reel| reel.iter().all(|&symbol| symbol == WILD_ID));
    if is_jackpot {
        return (Vec::new(), JACKPOT_AMOUNT, true);
    }

    let mut winning_lines = Vec::new();
    let mut total_win = 0u64;

    for &line in active_line_numbers(active_lines) {
        let positions = line_positions(line);
        let symbols: Vec<u8> = positions.iter().map(|&(reel, row)| grid[reel][row]).collect();
        let Some((symbol, run)) = line_run(&symbols) else {
            continue;
        };

        let mut multiplier_bps =
            symbol_value_bps(symbol).saturating_mul((run - 2) as u64);
        multiplier_bps = multiplier_bps * house_adjustment_bps / MULTIPLIER_SCALE;
        if line >= 4 {
            multiplier_bps = multiplier_bps * DIAGONAL_BONUS_BPS / MULTIPLIER_SCALE;
        }

        let scaled =
            (bet_amount as u128) * (multiplier_bps as u128) + (MULTIPLIER_SCALE as u128) / 2;
        let line_win = (scaled / MULTIPLIER_SCALE as u128) as u64;
        total_win = total_win.saturating_add(line_win);

        winning_lines.push(WinningLine {
            line,
            symbol,
            run,
            multiplier_bps,
        });
    }

    (winning_lines, total_win, false)
}

pub struct Slots;

impl OutcomeEngine for Slots {
    fn play(
        bet: &BetRequest,
        rules: &HouseRules,
        rng: &mut GameRng,
    ) -> Result<RoundOutcome, EngineError> {
        let Choice::Slots { active_lines } = &bet.choice else {
            return Err(EngineError::IllegalAction("expected a slots choice"));
        };
        if !(1..=5).contains(active_lines) {
            return Err(EngineError::IllegalAction(
                "active lines must be within 1..=5",
            ));
        }

        let weights: Vec<(u8, u64)> = SYMBOLS
            .iter()
            .map(|symbol| (symbol.id, symbol.weight))
            .collect();

        // Stop every position independently.
        let mut grid = [[0u8; ROW_COUNT]; REEL_COUNT];
        for reel in grid.iter_mut() {
            for cell in reel.iter_mut() {
                *cell = *pick_weighted(rng, &weights)?;
            }
        }

        let (winning_lines, win_amount, is_jackpot) = evaluate_spin(
            &grid,
            *active_lines,
            bet.amount,
            rules.house_adjustment_bps(),
        );

        let multiplier_bps = if bet.amount > 0 {
            ((win_amount as u128) * (MULTIPLIER_SCALE as u128) / (bet.amount as u128)) as u64
        } else {
            0
        };

        Ok(RoundOutcome {
            is_win: win_amount > 0,
            total_staked: bet.amount,
            win_amount,
            multiplier_bps,
            data: OutcomeData::Slots(SlotsData {
                reels: grid.iter().map(|reel| reel.to_vec()).collect(),
                winning_lines,
                is_jackpot,
            }),
        })
    }
}
