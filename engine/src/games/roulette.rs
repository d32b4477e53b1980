//! Roulette engine.
//!
//! European single-zero wheel. The outcome number is drawn uniformly
//! from 0..=36, independent of the physical wheel ordering. The
//! ordering is carried in the result data so the animation can stop on
//! the right pocket, and for nothing else.
//!
//! Bet types (with payout multiplier applied to the stake):
//! - `single`: any selected number matches (35x)
//! - `red-black`, `odd-even`, `high-low`: flag bets (1x)
//! - `dozen`: 1-12 / 13-24 / 25-36 (2x)
//! - `column`: number mod 3 (2x)
//!
//! Zero is green and loses every outside bet.

use velvet_types::{
    BetRequest, Choice, HouseRules, OutcomeData, PocketColor, RouletteBetType, RouletteData,
    RoundOutcome, MULTIPLIER_SCALE,
};

use crate::error::EngineError;
use crate::rng::GameRng;

use super::OutcomeEngine;

/// Red numbers on a roulette wheel.
const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Physical pocket ordering of a European wheel, clockwise from zero.
/// Animation-only: payouts never read this.
const WHEEL_ORDER: [u8; 37] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

/// Check if a number is red.
fn is_red(number: u8) -> bool {
    RED_NUMBERS.contains(&number)
}

/// Pocket color for a drawn number.
fn pocket_color(number: u8) -> PocketColor {
    if number == 0 {
        PocketColor::Green
    } else if is_red(number) {
        PocketColor::Red
    } else {
        PocketColor::Black
    }
}

/// Index of a number in the physical wheel ordering.
fn wheel_position(number: u8) -> u8 {
    WHEEL_ORDER
        .iter()
        .position(|&pocket| pocket == number)
        .unwrap_or(0) as u8
}

/// Validate the `selected_numbers` payload for a bet type.
fn validate_selection(bet_type: RouletteBetType, selected: &[u8]) -> Result<(), EngineError> {
    match bet_type {
        RouletteBetType::Single => {
            if selected.is_empty() || selected.iter().any(|&n| n > 36) {
                return Err(EngineError::IllegalAction(
                    "single bets need selected numbers within 0..=36",
                ));
            }
        }
        RouletteBetType::RedBlack | RouletteBetType::OddEven | RouletteBetType::HighLow => {
            if selected.first().map_or(true, |&flag| flag > 1) {
                return Err(EngineError::IllegalAction(
                    "flag bets need one selection, 0 or 1",
                ));
            }
        }
        RouletteBetType::Dozen | RouletteBetType::Column => {
            if selected.first().map_or(true, |&index| index > 2) {
                return Err(EngineError::IllegalAction(
                    "dozen and column bets need one selection within 0..=2",
                ));
            }
        }
    }
    Ok(())
}

/// Check if a bet wins for a given result.
fn bet_wins(bet_type: RouletteBetType, selected: &[u8], result: u8) -> bool {
    // Zero loses every outside bet; only a straight selection of 0 pays.
    if result == 0 {
        return bet_type == RouletteBetType::Single && selected.contains(&0);
    }

    match bet_type {
        RouletteBetType::Single => selected.contains(&result),
        RouletteBetType::RedBlack => {
            let betting_on_red = selected[0] == 1;
            betting_on_red == is_red(result)
        }
        RouletteBetType::OddEven => {
            let betting_on_odd = selected[0] == 1;
            betting_on_odd == (result % 2 == 1)
        }
        RouletteBetType::HighLow => {
            let betting_on_high = selected[0] == 1;
            betting_on_high == (result >= 19)
        }
        RouletteBetType::Dozen => (result - 1) / 12 == selected[0],
        RouletteBetType::Column => result % 3 == selected[0],
    }
}

/// Payout multiplier for a bet type, in basis points of the stake.
fn payout_multiplier_bps(bet_type: RouletteBetType) -> u64 {
    let multiplier = match bet_type {
        RouletteBetType::Single => 35,
        RouletteBetType::RedBlack | RouletteBetType::OddEven | RouletteBetType::HighLow => 1,
        RouletteBetType::Dozen | RouletteBetType::Column => 2,
    };
    multiplier * MULTIPLIER_SCALE
}

pub struct Roulette;

impl OutcomeEngine for Roulette {
    fn play(
        bet: &BetRequest,
        _rules: &HouseRules,
        rng: &mut GameRng,
    ) -> Result<RoundOutcome, EngineError> {
        let Choice::Roulette {
            bet_type,
            selected_numbers,
        } = &bet.choice
        else {
            return Err(EngineError::IllegalAction("expected a roulette choice"));
        };
        validate_selection(*bet_type, selected_numbers)?;

        // Spin the wheel.
        let result = rng.spin_roulette();
        let matched = bet_wins(*bet_type, selected_numbers, result);

        let multiplier_bps = if matched {
            payout_multiplier_bps(*bet_type)
        } else {
            0
        };
        let win_amount = bet.amount * multiplier_bps / MULTIPLIER_SCALE;

        Ok(RoundOutcome {
            is_win: matched,
            total_staked: bet.amount,
            win_amount,
            multiplier_bps,
            data: OutcomeData::Roulette(RouletteData {
                number: result,
                color: pocket_color(result),
                wheel_position: wheel_position(result),
                matched,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use velvet_types::{GameType, RulesStore};

    use super::*;

    fn test_bet(bet_type: RouletteBetType, selected: Vec<u8>, amount: u64) -> BetRequest {
        BetRequest {
            game: GameType::Roulette,
            player: 1,
            amount,
            choice: Choice::Roulette {
                bet_type,
                selected_numbers: selected,
            },
        }
    }

    fn test_rules() -> HouseRules {
        RulesStore::new().rules(GameType::Roulette).expect("rules")
    }

    #[test]
    fn test_is_red() {
        assert!(is_red(1));
        assert!(is_red(3));
        assert!(is_red(32));
        assert!(!is_red(2));
        assert!(!is_red(4));
        assert!(!is_red(0));
    }

    #[test]
    fn test_wheel_order_covers_all_pockets() {
        let mut seen = [false; 37];
        for &pocket in &WHEEL_ORDER {
            assert!(!seen[pocket as usize], "duplicate pocket {pocket}");
            seen[pocket as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(wheel_position(0), 0);
        assert_eq!(wheel_position(32), 1);
        assert_eq!(wheel_position(26), 36);
    }

    #[test]
    fn test_bet_wins_single() {
        assert!(bet_wins(RouletteBetType::Single, &[17], 17));
        assert!(!bet_wins(RouletteBetType::Single, &[17], 18));
        assert!(bet_wins(RouletteBetType::Single, &[0], 0));
        assert!(!bet_wins(RouletteBetType::Single, &[1], 0));
        assert!(bet_wins(RouletteBetType::Single, &[4, 8, 15], 15));
    }

    #[test]
    fn test_bet_wins_colors() {
        assert!(bet_wins(RouletteBetType::RedBlack, &[1], 1));
        assert!(bet_wins(RouletteBetType::RedBlack, &[1], 3));
        assert!(!bet_wins(RouletteBetType::RedBlack, &[1], 2));
        assert!(!bet_wins(RouletteBetType::RedBlack, &[1], 0)); // Zero loses

        assert!(bet_wins(RouletteBetType::RedBlack, &[0], 2));
        assert!(bet_wins(RouletteBetType::RedBlack, &[0], 4));
        assert!(!bet_wins(RouletteBetType::RedBlack, &[0], 1));
        assert!(!bet_wins(RouletteBetType::RedBlack, &[0], 0)); // Zero loses
    }

    #[test]
    fn test_bet_wins_odd_even() {
        assert!(bet_wins(RouletteBetType::OddEven, &[1], 1));
        assert!(bet_wins(RouletteBetType::OddEven, &[1], 35));
        assert!(!bet_wins(RouletteBetType::OddEven, &[1], 2));
        assert!(!bet_wins(RouletteBetType::OddEven, &[1], 0));

        assert!(bet_wins(RouletteBetType::OddEven, &[0], 2));
        assert!(bet_wins(RouletteBetType::OddEven, &[0], 36));
        assert!(!bet_wins(RouletteBetType::OddEven, &[0], 1));
        assert!(!bet_wins(RouletteBetType::OddEven, &[0], 0));
    }

    #[test]
    fn test_bet_wins_high_low() {
        assert!(bet_wins(RouletteBetType::HighLow, &[0], 1));
        assert!(bet_wins(RouletteBetType::HighLow, &[0], 18));
        assert!(!bet_wins(RouletteBetType::HighLow, &[0], 19));
        assert!(!bet_wins(RouletteBetType::HighLow, &[0], 0));

        assert!(bet_wins(RouletteBetType::HighLow, &[1], 19));
        assert!(bet_wins(RouletteBetType::HighLow, &[1], 36));
        assert!(!bet_wins(RouletteBetType::HighLow, &[1], 18));
        assert!(!bet_wins(RouletteBetType::HighLow, &[1], 0));
    }

    #[test]
    fn test_bet_wins_dozen() {
        assert!(bet_wins(RouletteBetType::Dozen, &[0], 1));
        assert!(bet_wins(RouletteBetType::Dozen, &[0], 12));
        assert!(!bet_wins(RouletteBetType::Dozen, &[0], 13));

        assert!(bet_wins(RouletteBetType::Dozen, &[1], 13));
        assert!(bet_wins(RouletteBetType::Dozen, &[1], 24));
        assert!(!bet_wins(RouletteBetType::Dozen, &[1], 12));

        assert!(bet_wins(RouletteBetType::Dozen, &[2], 25));
        assert!(bet_wins(RouletteBetType::Dozen, &[2], 36));
        assert!(!bet_wins(RouletteBetType::Dozen, &[2], 24));
    }

    #[test]
    fn test_bet_wins_column() {
        // Columns follow number mod 3.
        assert!(bet_wins(RouletteBetType::Column, &[0], 3));
        assert!(bet_wins(RouletteBetType::Column, &[0], 36));
        assert!(!bet_wins(RouletteBetType::Column, &[0], 1));

        assert!(bet_wins(RouletteBetType::Column, &[1], 1));
        assert!(bet_wins(RouletteBetType::Column, &[1], 34));
        assert!(!bet_wins(RouletteBetType::Column, &[1], 3));

        assert!(bet_wins(RouletteBetType::Column, &[2], 2));
        assert!(bet_wins(RouletteBetType::Column, &[2], 35));
        assert!(!bet_wins(RouletteBetType::Column, &[2], 1));
    }

    #[test]
    fn test_payout_multipliers() {
        assert_eq!(payout_multiplier_bps(RouletteBetType::Single), 350_000);
        assert_eq!(payout_multiplier_bps(RouletteBetType::RedBlack), 10_000);
        assert_eq!(payout_multiplier_bps(RouletteBetType::OddEven), 10_000);
        assert_eq!(payout_multiplier_bps(RouletteBetType::HighLow), 10_000);
        assert_eq!(payout_multiplier_bps(RouletteBetType::Dozen), 20_000);
        assert_eq!(payout_multiplier_bps(RouletteBetType::Column), 20_000);
    }

    #[test]
    fn test_invalid_selections_rejected() {
        let rules = test_rules();
        let mut rng = GameRng::new(b"roulette", 1);

        let bet = test_bet(RouletteBetType::Single, vec![37], 100);
        assert!(matches!(
            Roulette::play(&bet, &rules, &mut rng),
            Err(EngineError::IllegalAction(_))
        ));

        let bet = test_bet(RouletteBetType::Single, vec![], 100);
        assert!(Roulette::play(&bet, &rules, &mut rng).is_err());

        let bet = test_bet(RouletteBetType::Dozen, vec![3], 100);
        assert!(Roulette::play(&bet, &rules, &mut rng).is_err());

        let bet = test_bet(RouletteBetType::RedBlack, vec![2], 100);
        assert!(Roulette::play(&bet, &rules, &mut rng).is_err());
    }

    #[test]
    fn test_straight_win_pays_35_to_1() {
        // A single bet of 100 on a matching number pays exactly 3500;
        // a non-matching one pays 0. Scan round ids until both cases
        // have been observed.
        let rules = test_rules();
        let mut saw_win = false;
        let mut saw_loss = false;
        for round_id in 0..600 {
            let mut rng = GameRng::new(b"roulette straight", round_id);
            let bet = test_bet(RouletteBetType::Single, vec![17], 100);
            let outcome = Roulette::play(&bet, &rules, &mut rng).expect("play failed");
            let OutcomeData::Roulette(data) = &outcome.data else {
                panic!("wrong result data");
            };
            if data.number == 17 {
                assert!(outcome.is_win);
                assert_eq!(outcome.win_amount, 3_500);
                saw_win = true;
            } else {
                assert!(!outcome.is_win);
                assert_eq!(outcome.win_amount, 0);
                saw_loss = true;
            }
            if saw_win && saw_loss {
                break;
            }
        }
        assert!(saw_win, "no matching spin within 600 rounds");
        assert!(saw_loss);
    }

    #[test]
    fn test_result_data_is_consistent() {
        let rules = test_rules();
        for round_id in 0..50 {
            let mut rng = GameRng::new(b"roulette data", round_id);
            let bet = test_bet(RouletteBetType::RedBlack, vec![1], 100);
            let outcome = Roulette::play(&bet, &rules, &mut rng).expect("play failed");
            let OutcomeData::Roulette(data) = &outcome.data else {
                panic!("wrong result data");
            };
            assert!(data.number <= 36);
            assert_eq!(data.color, pocket_color(data.number));
            assert_eq!(WHEEL_ORDER[data.wheel_position as usize], data.number);
            assert_eq!(data.matched, outcome.is_win);
            assert_eq!(outcome.total_staked, 100);
        }
    }
}
