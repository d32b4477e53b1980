//! Poker engine (simplified heads-up hold'em).
//!
//! One bet request plays a full round: two hole cards each for player
//! and dealer, five community cards, all from one fresh deck (nine
//! draws, no collision). Stage order Preflop -> Flop -> Turn -> River
//! -> Showdown; `fold` jumps straight to showdown as an automatic
//! loss, `raise` stakes a second bet-sized unit before the board runs
//! out.
//!
//! Hand evaluation is deliberately incomplete: each side's seven cards
//! classify only as four of a kind > full house > three of a kind >
//! two pair > pair > high card. Straights, flushes, and kickers are
//! not evaluated; equal categories are a push splitting the pot.
//!
//! Payouts: win 2x the bet (3x after a raise); push returns the
//! player's stake.

use velvet_types::{
    BetRequest, Card, Choice, HandCategory, HandRank, HouseRules, OutcomeData, PokerAction,
    PokerData, RoundOutcome, MULTIPLIER_SCALE,
};

use crate::deck::Deck;
use crate::error::EngineError;
use crate::rng::GameRng;

use super::OutcomeEngine;

/// Classify a hand by rank multiplicity alone.
///
/// Counts cards per ace-high rank, then checks quads, trips, and the
/// number of ranks paired exactly twice. Three pairs in seven cards
/// fall through to high card; two separate trips classify as three of
/// a kind (no pair remains to fill the house).
pub(crate) fn evaluate_hand(cards: &[Card]) -> HandRank {
    let mut counts = [0u8; 15];
    for card in cards {
        counts[card.ace_high_value() as usize] += 1;
    }

    let pairs = counts.iter().filter(|&&count| count == 2).count();
    let has_trips = counts.iter().any(|&count| count == 3);
    let has_quads = counts.iter().any(|&count| count == 4);

    let category = if has_quads {
        HandCategory::FourOfAKind
    } else if has_trips && pairs > 0 {
        HandCategory::FullHouse
    } else if has_trips {
        HandCategory::ThreeOfAKind
    } else if pairs == 2 {
        HandCategory::TwoPair
    } else if pairs == 1 {
        HandCategory::Pair
    } else {
        HandCategory::HighCard
    };
    HandRank::new(category)
}

/// Settle a showdown. Returns `(is_win, is_push, win_amount)` where
/// `win_amount` is the total return credited.
fn settle(
    action: PokerAction,
    bet_amount: u64,
    stake: u64,
    player_rank: HandRank,
    dealer_rank: HandRank,
) -> (bool, bool, u64) {
    if action == PokerAction::Fold {
        return (false, false, 0);
    }
    if player_rank.rank > dealer_rank.rank {
        let multiplier = if action == PokerAction::Raise { 3 } else { 2 };
        return (true, false, bet_amount.saturating_mul(multiplier));
    }
    if player_rank.rank == dealer_rank.rank {
        // Pot split: the dealer matches the stake, so half the pot is
        // exactly the player's stake back.
        return (false, true, stake);
    }
    (false, false, 0)
}

pub struct Poker;

impl OutcomeEngine for Poker {
    fn play(
        bet: &BetRequest,
        _rules: &HouseRules,
        rng: &mut GameRng,
    ) -> Result<RoundOutcome, EngineError> {
        let Choice::Poker { action } = &bet.choice else {
            return Err(EngineError::IllegalAction("expected a poker choice"));
        };

        let mut deck = Deck::shuffled(rng);

        // Preflop: hole cards for both sides.
        let player_hole = deck.draw_n(2)?;
        let dealer_hole = deck.draw_n(2)?;

        // Flop, turn, river.
        let mut community = deck.draw_n(3)?;
        community.push(deck.draw()?);
        community.push(deck.draw()?);

        // Raise stakes a second unit; affordability was validated
        // before the deal.
        let stake = if *action == PokerAction::Raise {
            bet.amount.saturating_mul(2)
        } else {
            bet.amount
        };

        let mut player_seven = player_hole.clone();
        player_seven.extend_from_slice(&community);
        let mut dealer_seven = dealer_hole.clone();
        dealer_seven.extend_from_slice(&community);

        let player_rank = evaluate_hand(&player_seven);
        let dealer_rank = evaluate_hand(&dealer_seven);

        let (is_win, is_push, win_amount) =
            settle(*action, bet.amount, stake, player_rank, dealer_rank);
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
            data: OutcomeData::Poker(PokerData {
                player_hole,
                dealer_hole,
                community,
                player_rank,
                dealer_rank,
                folded: *action == PokerAction::Fold,
                is_push,
            }),
        })
    }
}
