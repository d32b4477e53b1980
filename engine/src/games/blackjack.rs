//! Blackjack engine.
//!
//! One bet request plays a full round: fresh shuffled deck, two cards
//! each, the player's single decision, then the dealer's forced draw.
//! Round flow: Betting -> Playing -> DealerTurn -> GameOver.
//!
//! House rules (engine defaults):
//! - Single deck, re-shuffled every round
//! - Dealer stands on all 17s, soft included
//! - A two-card 21 is an immediate stand with the ordinary 2x payout
//!   (no separate 3:2 blackjack bonus)
//!
//! Payouts, applied to the stake (doubled stake after `double`):
//! - Dealer busts or player total is higher: 2x
//! - Equal totals: push, stake returned
//! - Otherwise: loss

use velvet_types::{
    BetRequest, BlackjackAction, BlackjackData, Card, Choice, HouseRules, OutcomeData,
    RoundOutcome, MULTIPLIER_SCALE,
};

use crate::deck::Deck;
use crate::error::EngineError;
use crate::rng::GameRng;

use super::OutcomeEngine;

/// The dealer draws to any total below this and stands at or above it.
const DEALER_STANDS_AT: u8 = 17;

/// Calculate the value of a blackjack hand.
///
/// Aces count 11 and downgrade to 1 one at a time while the total is
/// over 21 (subtract 10 per downgrade). Returns the total and whether
/// the hand is soft (an ace still counted as 11).
pub(crate) fn hand_total(cards: &[Card]) -> (u8, bool) {
    let mut total: u16 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        total += card.blackjack_value() as u16;
        if card.is_ace() {
            aces += 1;
        }
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && total <= 21;
    (total.min(u8::MAX as u16) as u8, is_soft)
}

/// Settle a finished round. Returns `(is_win, is_push, win_amount)`
/// where `win_amount` is the total return on the stake.
fn settle(player_total: u8, dealer_total: u8, stake: u64) -> (bool, bool, u64) {
    if player_total > 21 {
        return (false, false, 0);
    }
    if dealer_total > 21 || player_total > dealer_total {
        return (true, false, stake.saturating_mul(2));
    }
    if player_total == dealer_total {
        return (false, true, stake);
    }
    (false, false, 0)
}

pub struct Blackjack;

impl OutcomeEngine for Blackjack {
    fn play(
        bet: &BetRequest,
        _rules: &HouseRules,
        rng: &mut GameRng,
    ) -> Result<RoundOutcome, EngineError> {
        let Choice::Blackjack { action } = &bet.choice else {
            return Err(EngineError::IllegalAction("expected a blackjack choice"));
        };

        let mut deck = Deck::shuffled(rng);
        let mut player_cards = deck.draw_n(2)?;
        let mut dealer_cards = deck.draw_n(2)?;

        // Resolve the player's decision. Affordability of the doubled
        // stake was checked during bet validation, before the deal.
        let mut stake = bet.amount;
        match action {
            BlackjackAction::Hit => {
                player_cards.push(deck.draw()?);
            }
            BlackjackAction::Double => {
                stake = stake.saturating_mul(2);
                player_cards.push(deck.draw()?);
            }
            BlackjackAction::Stand => {}
        }

        let (player_total, _) = hand_total(&player_cards);

        // Dealer turn: draws to 17, skipped entirely if the player bust.
        if player_total <= 21 {
            while hand_total(&dealer_cards).0 < DEALER_STANDS_AT {
                dealer_cards.push(deck.draw()?);
            }
        }
        let (dealer_total, _) = hand_total(&dealer_cards);

        let (is_win, is_push, win_amount) = settle(player_total, dealer_total, stake);
        let multiplier_bps = if stake > 0 {
            win_amount * MULTIPLIER_SCALE / stake
        } else {
            0
        };

        Ok(RoundOutcome {
            is_win,
            total_staked: stake,
            win_amount,
            multiplier_bps,
            data: OutcomeData::Blackjack(BlackjackData {
                player_cards,
                dealer_cards,
                player_total,
                dealer_total,
                is_push,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use velvet_types::{GameType, RulesStore};

    use super::*;

    fn cards(codes: &[&str]) -> Vec<Card> {
        codes.iter()
            .map(|s| s.parse().expect("bad card literal"))
            .collect()
    }

    fn test_bet(action: BlackjackAction, amount: u64) -> BetRequest {
        BetRequest {
            game: GameType::Blackjack,
            player: 1,
            amount,
            choice: Choice::Blackjack { action },
        }
    }

    fn test_rules() -> HouseRules {
        RulesStore::new().rules(GameType::Blackjack).expect("rules")
    }

    #[test]
    fn test_hand_total_soft_aces() {
        // One ace counted as 11, one as 1.
        assert_eq!(hand_total(&cards(&["Ah", "As", "9d"])), (21, true));
        // Two downgrades.
        assert_eq!(hand_total(&cards(&["Ah", "As", "Ac", "8d"])), (21, true));
        assert_eq!(hand_total(&cards(&["Kh", "Qd"])), (20, false));
        assert_eq!(hand_total(&cards(&["Ah", "Kd"])), (21, true));
        assert_eq!(hand_total(&cards(&["Ah", "9d"])), (20, true));
        assert_eq!(hand_total(&cards(&["Ah", "9d", "5c"])), (15, false));
        assert_eq!(hand_total(&cards(&["Kh", "Qd", "2c"])), (22, false));
    }

    #[test]
    fn test_settle_player_bust_loses() {
        assert_eq!(settle(22, 17, 100), (false, false, 0));
        // A player bust loses even if the dealer would also bust.
        assert_eq!(settle(25, 26, 100), (false, false, 0));
    }

    #[test]
    fn test_settle_dealer_bust_pays_double() {
        assert_eq!(settle(18, 22, 100), (true, false, 200));
        assert_eq!(settle(18, 22, 200), (true, false, 400));
    }

    #[test]
    fn test_settle_higher_total_wins() {
        assert_eq!(settle(20, 18, 100), (true, false, 200));
        assert_eq!(settle(18, 20, 100), (false, false, 0));
    }

    #[test]
    fn test_settle_push_returns_stake() {
        // Player 20 vs dealer 20: push, original bet returned, no net
        // gain or loss.
        assert_eq!(settle(20, 20, 100), (false, true, 100));
        assert_eq!(settle(17, 17, 250), (false, true, 250));
    }

    #[test]
    fn test_round_invariants_across_seeds() {
        let rules = test_rules();
        for round_id in 0..200 {
            let mut rng = GameRng::new(b"blackjack", round_id);
            let bet = test_bet(BlackjackAction::Stand, 100);
            let outcome = Blackjack::play(&bet, &rules, &mut rng).expect("play failed");
            let OutcomeData::Blackjack(data) = &outcome.data else {
                panic!("wrong result data");
            };

            assert_eq!(outcome.total_staked, 100);
            assert_eq!(data.player_cards.len(), 2);
            assert!(data.dealer_cards.len() >= 2);
            assert_eq!(hand_total(&data.player_cards).0, data.player_total);
            assert_eq!(hand_total(&data.dealer_cards).0, data.dealer_total);

            // Standing on two cards never busts the player.
            assert!(data.player_total <= 21);
            // The dealer never draws past a resolved total.
            if data.dealer_total <= 21 {
                assert!(data.dealer_total >= DEALER_STANDS_AT);
            }

            let expected =
                settle(data.player_total, data.dealer_total, outcome.total_staked);
            assert_eq!(
                (outcome.is_win, data.is_push, outcome.win_amount),
                expected
            );
        }
    }

    #[test]
    fn test_hit_deals_exactly_one_card() {
        let rules = test_rules();
        for round_id in 0..50 {
            let mut rng = GameRng::new(b"blackjack hit", round_id);
            let bet = test_bet(BlackjackAction::Hit, 100);
            let outcome = Blackjack::play(&bet, &rules, &mut rng).expect("play failed");
            let OutcomeData::Blackjack(data) = &outcome.data else {
                panic!("wrong result data");
            };
            assert_eq!(data.player_cards.len(), 3);
            if data.player_total > 21 {
                // Bust is an immediate loss and the dealer stays on
                // the initial two cards.
                assert!(!outcome.is_win);
                assert_eq!(outcome.win_amount, 0);
                assert_eq!(data.dealer_cards.len(), 2);
            }
        }
    }

    #[test]
    fn test_double_doubles_the_stake() {
        let rules = test_rules();
        for round_id in 0..50 {
            let mut rng = GameRng::new(b"blackjack double", round_id);
            let bet = test_bet(BlackjackAction::Double, 100);
            let outcome = Blackjack::play(&bet, &rules, &mut rng).expect("play failed");
            let OutcomeData::Blackjack(data) = &outcome.data else {
                panic!("wrong result data");
            };
            assert_eq!(outcome.total_staked, 200);
            assert_eq!(data.player_cards.len(), 3);
            // Win pays 4x the original bet, push returns the doubled
            // stake, loss pays nothing.
            assert!([400, 200, 0].contains(&outcome.win_amount));
        }
    }

    #[test]
    fn test_wrong_choice_rejected() {
        let rules = test_rules();
        let mut rng = GameRng::new(b"blackjack", 1);
        let bet = BetRequest {
            game: GameType::Blackjack,
            player: 1,
            amount: 100,
            choice: Choice::Slots { active_lines: 1 },
        };
        assert!(matches!(
            Blackjack::play(&bet, &rules, &mut rng),
            Err(EngineError::IllegalAction(_))
        ));
    }
}
