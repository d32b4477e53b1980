//! Round outcomes and per-game result data.
//!
//! A `RoundOutcome` is produced exactly once per round, is immutable,
//! and fully determines the ledger effect: the ledger debits
//! `total_staked` and credits `win_amount`. All multipliers are fixed
//! point in basis points (1.0x = 10 000) so no payout path touches
//! floating point.

use serde::{Deserialize, Serialize};

use crate::bet::{GameType, RiskLevel};
use crate::cards::Card;

/// Basis points in 1.0x. All payout multipliers are scaled by this.
pub const MULTIPLIER_SCALE: u64 = 10_000;

/// Pocket color on the roulette wheel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PocketColor {
    Green,
    Red,
    Black,
}

/// Roulette result: the drawn pocket and whether the bet's predicate
/// matched it. `wheel_position` is the pocket's index in the physical
/// wheel ordering, for animation only. It never affects payouts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouletteData {
    pub number: u8,
    pub color: PocketColor,
    pub wheel_position: u8,
    pub matched: bool,
}

/// Blackjack result: both final hands and totals. The dealer's hole
/// card is only ever revealed here, after resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackjackData {
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    pub player_total: u8,
    pub dealer_total: u8,
    pub is_push: bool,
}

/// Poker hand categories the simplified evaluator recognizes.
///
/// Straights, flushes, and kicker comparisons are deliberately not
/// evaluated; ties within a category are a push.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandCategory {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
}

impl HandCategory {
    /// Strictly ordered comparison rank on the full ten-category
    /// scale. The unevaluated categories (straight 4, flush 5, and up)
    /// keep their slots, hence the gap above three of a kind.
    pub fn rank(&self) -> u8 {
        match self {
            HandCategory::HighCard => 0,
            HandCategory::Pair => 1,
            HandCategory::TwoPair => 2,
            HandCategory::ThreeOfAKind => 3,
            HandCategory::FullHouse => 6,
            HandCategory::FourOfAKind => 7,
        }
    }

    /// Display name for result messages.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
        }
    }
}

/// A classified hand: category plus its comparison rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandRank {
    pub category: HandCategory,
    pub rank: u8,
}

impl HandRank {
    pub fn new(category: HandCategory) -> Self {
        Self {
            category,
            rank: category.rank(),
        }
    }
}

/// Poker result: hole cards, board, and both classifications.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokerData {
    pub player_hole: Vec<Card>,
    pub dealer_hole: Vec<Card>,
    pub community: Vec<Card>,
    pub player_rank: HandRank,
    pub dealer_rank: HandRank,
    pub folded: bool,
    pub is_push: bool,
}

/// Plinko result: the position after each row and the final bucket.
/// The client animation must terminate at `bucket`; the path is the
/// authoritative record of the walk, not a rendering suggestion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlinkoData {
    pub risk_level: RiskLevel,
    pub path: Vec<u8>,
    pub bucket: u8,
}

/// One paying slot line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinningLine {
    /// Line number: 1 = middle row, 2 = top, 3 = bottom,
    /// 4 = down diagonal, 5 = up diagonal.
    pub line: u8,
    /// Symbol id the run is built from.
    pub symbol: u8,
    /// Length of the matching run from reel 0.
    pub run: u8,
    pub multiplier_bps: u64,
}

/// Slots result: the visible 5x3 grid (outer index = reel, inner =
/// row top-to-bottom) as symbol ids, plus every line that paid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsData {
    pub reels: Vec<Vec<u8>>,
    pub winning_lines: Vec<WinningLine>,
    pub is_jackpot: bool,
}

/// Game-specific result payload, keyed by game id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum OutcomeData {
    Roulette(RouletteData),
    Blackjack(BlackjackData),
    Poker(PokerData),
    Plinko(PlinkoData),
    Slots(SlotsData),
}

/// The engine's output for one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundOutcome {
    pub is_win: bool,
    /// Chips actually wagered: the bet, or twice it after a blackjack
    /// double / poker raise.
    pub total_staked: u64,
    /// Total return credited (stake included). Zero on a loss.
    pub win_amount: u64,
    /// `win_amount` relative to `total_staked`, in basis points.
    pub multiplier_bps: u64,
    pub data: OutcomeData,
}

impl RoundOutcome {
    pub fn game(&self) -> GameType {
        match &self.data {
            OutcomeData::Roulette(_) => GameType::Roulette,
            OutcomeData::Blackjack(_) => GameType::Blackjack,
            OutcomeData::Poker(_) => GameType::Poker,
            OutcomeData::Plinko(_) => GameType::Plinko,
            OutcomeData::Slots(_) => GameType::Slots,
        }
    }

    /// Whether the round tied, returning the stake with no net
    /// gain or loss. Only the card games can push.
    pub fn is_push(&self) -> bool {
        match &self.data {
            OutcomeData::Blackjack(data) => data.is_push,
            OutcomeData::Poker(data) => data.is_push,
            _ => false,
        }
    }

    /// Net chip movement applied to the ledger: `win_amount - total_staked`.
    pub fn net_amount(&self) -> i64 {
        (self.win_amount as i128 - self.total_staked as i128)
            .clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ordering() {
        assert!(HandCategory::FourOfAKind.rank() > HandCategory::FullHouse.rank());
        assert!(HandCategory::FullHouse.rank() > HandCategory::ThreeOfAKind.rank());
        assert!(HandCategory::ThreeOfAKind.rank() > HandCategory::TwoPair.rank());
        assert!(HandCategory::TwoPair.rank() > HandCategory::Pair.rank());
        assert!(HandCategory::Pair.rank() > HandCategory::HighCard.rank());
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = RoundOutcome {
            is_win: true,
            total_staked: 100,
            win_amount: 3500,
            multiplier_bps: 35 * MULTIPLIER_SCALE,
            data: OutcomeData::Roulette(RouletteData {
                number: 17,
                color: PocketColor::Black,
                wheel_position: 8,
                matched: true,
            }),
        };
        let json = serde_json::to_string(&outcome).expect("serialize failed");
        assert!(json.contains(r#""isWin":true"#));
        assert!(json.contains(r#""winAmount":3500"#));
        assert!(json.contains(r#""game":"roulette""#));
        assert!(json.contains(r#""color":"black""#));

        let back: RoundOutcome = serde_json::from_str(&json).expect("deserialize failed");
        assert_eq!(back, outcome);
        assert_eq!(back.game(), GameType::Roulette);
        assert_eq!(back.net_amount(), 3400);
    }

    #[test]
    fn test_net_amount_on_loss() {
        let outcome = RoundOutcome {
            is_win: false,
            total_staked: 250,
            win_amount: 0,
            multiplier_bps: 0,
            data: OutcomeData::Plinko(PlinkoData {
                risk_level: RiskLevel::Low,
                path: vec![8, 7, 8, 7, 6, 7, 8, 7, 6, 5, 6, 5],
                bucket: 5,
            }),
        };
        assert_eq!(outcome.net_amount(), -250);
    }
}
