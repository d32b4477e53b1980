//! Round orchestration: rules -> validation -> engine -> ledger.
//!
//! This is the single entry point callers use to play a round. The
//! current house rules are re-read here at the start of every round,
//! the bet is validated before any randomness is drawn, the matching
//! engine resolves the outcome with a round-scoped RNG, and the ledger
//! applies the result. A rejected bet mutates nothing.

use velvet_types::{
    BetRequest, BlackjackAction, Choice, HouseRules, PokerAction, RoundOutcome, RulesStore,
    Transaction,
};

use crate::error::{BetError, EngineError};
use crate::games;
use crate::ledger::Ledger;
use crate::rng::GameRng;

/// The chips a bet will actually put at risk: the amount, doubled for
/// the actions that stake a second unit mid-round.
fn required_stake(bet: &BetRequest) -> u64 {
    match &bet.choice {
        Choice::Blackjack {
            action: BlackjackAction::Double,
        }
        | Choice::Poker {
            action: PokerAction::Raise,
        } => bet.amount.saturating_mul(2),
        _ => bet.amount,
    }
}

/// Validate a bet against the current rules and balance. Returns the
/// required stake. Runs before any randomness is drawn; a rejection
/// leaves every piece of state untouched.
pub fn validate_bet(
    bet: &BetRequest,
    rules: &HouseRules,
    balance: u64,
) -> Result<u64, EngineError> {
    if bet.choice.game_type() != bet.game {
        return Err(EngineError::IllegalAction(
            "choice does not match the requested game",
        ));
    }
    if bet.amount == 0 {
        return Err(EngineError::InvalidBet(BetError::NonPositive));
    }
    if bet.amount < rules.min_bet {
        return Err(EngineError::InvalidBet(BetError::BelowMinimum {
            amount: bet.amount,
            min: rules.min_bet,
        }));
    }
    if bet.amount > rules.max_bet {
        return Err(EngineError::InvalidBet(BetError::AboveMaximum {
            amount: bet.amount,
            max: rules.max_bet,
        }));
    }

    let stake = required_stake(bet);
    if stake > balance {
        return Err(EngineError::InvalidBet(BetError::InsufficientBalance {
            required: stake,
            available: balance,
        }));
    }
    Ok(stake)
}

/// Play one full round for a bet request.
///
/// `seed` and `round_id` drive the round's deterministic RNG; `now` is
/// the timestamp recorded on the ledger transaction. Returns the
/// outcome together with the single game transaction it produced.
pub fn play_round(
    rules_store: &RulesStore,
    ledger: &mut Ledger,
    bet: &BetRequest,
    seed: &[u8],
    round_id: u64,
    now: u64,
) -> Result<(RoundOutcome, Transaction), EngineError> {
    let rules = rules_store.rules(bet.game).map_err(|_| {
        EngineError::InvalidConfiguration("no house rules registered for the requested game")
    })?;
    if !rules_store.is_active(bet.game) {
        return Err(EngineError::IllegalAction("game is not active"));
    }

    let balance = ledger.balance(bet.player)?;
    validate_bet(bet, &rules, balance)?;

    let mut rng = GameRng::new(seed, round_id);
    let outcome = games::resolve_round(bet, &rules, &mut rng)?;
    let transaction = ledger.apply_outcome(bet.player, &outcome, now)?;

    tracing::info!(
        player = bet.player,
        game = %bet.game,
        round_id = round_id,
        bet = bet.amount,
        staked = outcome.total_staked,
        win = outcome.win_amount,
        "casino round resolved"
    );
    Ok((outcome, transaction))
}

#[cfg(test)]
mod tests {
    use velvet_types::{GameType, RouletteBetType};

    use super::*;

    fn roulette_bet(amount: u64) -> BetRequest {
        BetRequest {
            game: GameType::Roulette,
            player: 1,
            amount,
            choice: Choice::Roulette {
                bet_type: RouletteBetType::Single,
                selected_numbers: vec![17],
            },
        }
    }

    fn rules() -> HouseRules {
        RulesStore::new().rules(GameType::Roulette).expect("rules")
    }

    #[test]
    fn test_validate_zero_amount() {
        assert!(matches!(
            validate_bet(&roulette_bet(0), &rules(), 1_000),
            Err(EngineError::InvalidBet(BetError::NonPositive))
        ));
    }

    #[test]
    fn test_validate_table_limits() {
        assert!(matches!(
            validate_bet(&roulette_bet(5), &rules(), 1_000),
            Err(EngineError::InvalidBet(BetError::BelowMinimum { .. }))
        ));
        assert!(matches!(
            validate_bet(&roulette_bet(5_000), &rules(), 100_000),
            Err(EngineError::InvalidBet(BetError::AboveMaximum { .. }))
        ));
        assert_eq!(validate_bet(&roulette_bet(100), &rules(), 1_000), Ok(100));
    }

    #[test]
    fn test_validate_balance() {
        assert!(matches!(
            validate_bet(&roulette_bet(100), &rules(), 99),
            Err(EngineError::InvalidBet(BetError::InsufficientBalance { .. }))
        ));
    }

    #[test]
    fn test_validate_game_choice_mismatch() {
        let bet = BetRequest {
            game: GameType::Slots,
            player: 1,
            amount: 10,
            choice: Choice::Roulette {
                bet_type: RouletteBetType::Single,
                selected_numbers: vec![17],
            },
        };
        let slots_rules = RulesStore::new().rules(GameType::Slots).expect("rules");
        assert!(matches!(
            validate_bet(&bet, &slots_rules, 1_000),
            Err(EngineError::IllegalAction(_))
        ));
    }

    #[test]
    fn test_validate_double_needs_twice_the_balance() {
        let bet = BetRequest {
            game: GameType::Blackjack,
            player: 1,
            amount: 100,
            choice: Choice::Blackjack {
                action: BlackjackAction::Double,
            },
        };
        let blackjack_rules = RulesStore::new()
            .rules(GameType::Blackjack)
            .expect("rules");
        assert!(matches!(
            validate_bet(&bet, &blackjack_rules, 150),
            Err(EngineError::InvalidBet(BetError::InsufficientBalance {
                required: 200,
                available: 150,
            }))
        ));
        assert_eq!(validate_bet(&bet, &blackjack_rules, 200), Ok(200));
    }

    #[test]
    fn test_validate_raise_needs_twice_the_balance() {
        let bet = BetRequest {
            game: GameType::Poker,
            player: 1,
            amount: 100,
            choice: Choice::Poker {
                action: PokerAction::Raise,
            },
        };
        let poker_rules = RulesStore::new().rules(GameType::Poker).expect("rules");
        assert_eq!(validate_bet(&bet, &poker_rules, 200), Ok(200));
        assert!(validate_bet(&bet, &poker_rules, 199).is_err());
    }
}
