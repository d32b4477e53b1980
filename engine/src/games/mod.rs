//! Per-game outcome engines.
//!
//! Each engine consumes a validated bet plus the current house rules
//! and resolves one complete round: draw randomness, shape the result
//! data, and price the payout. Engines never touch balances; they
//! only report what the round is worth.

pub mod blackjack;
pub mod plinko;
pub mod poker;
pub mod roulette;
pub mod slots;

use velvet_types::{BetRequest, GameType, HouseRules, RoundOutcome};

use crate::error::EngineError;
use crate::rng::GameRng;

/// Trait for game outcome engines. One invocation resolves one round.
pub trait OutcomeEngine {
    /// Play a full round for a validated bet. The rules were read at
    /// round start and stay fixed for the call.
    fn play(
        bet: &BetRequest,
        rules: &HouseRules,
        rng: &mut GameRng,
    ) -> Result<RoundOutcome, EngineError>;
}

/// Dispatch a bet to the matching game engine.
pub fn resolve_round(
    bet: &BetRequest,
    rules: &HouseRules,
    rng: &mut GameRng,
) -> Result<RoundOutcome, EngineError> {
    match bet.game {
        GameType::Roulette => roulette::Roulette::play(bet, rules, rng),
        GameType::Blackjack => blackjack::Blackjack::play(bet, rules, rng),
        GameType::Poker => poker::Poker::play(bet, rules, rng),
        GameType::Plinko => plinko::Plinko::play(bet, rules, rng),
        GameType::Slots => slots::Slots::play(bet, rules, rng),
    }
}
