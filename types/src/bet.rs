//! Bet requests and per-game choice payloads.
//!
//! A `BetRequest` is the engine's entire input for one round: which
//! game, who is playing, the stake, and the game-specific `Choice`.
//! The choice is a tagged union with one struct-like variant per game,
//! so malformed payloads are rejected at the serialization boundary
//! and never reach game logic as untyped data.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Player identifier, assigned by the account system.
pub type PlayerId = u64;

/// The five games the engine resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Roulette = 0,
    Blackjack = 1,
    Poker = 2,
    Plinko = 3,
    Slots = 4,
}

impl GameType {
    /// All supported game types.
    pub const ALL: [GameType; 5] = [
        GameType::Roulette,
        GameType::Blackjack,
        GameType::Poker,
        GameType::Plinko,
        GameType::Slots,
    ];

    /// Stable lowercase identifier, matching the wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Roulette => "roulette",
            GameType::Blackjack => "blackjack",
            GameType::Poker => "poker",
            GameType::Plinko => "plinko",
            GameType::Slots => "slots",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roulette bet types.
///
/// `selected_numbers` semantics per type:
/// - `Single`: the numbers bet on (0..=36); wins if any matches.
/// - `RedBlack` / `OddEven` / `HighLow`: one flag, 1 = red/odd/high,
///   0 = black/even/low.
/// - `Dozen` / `Column`: one index 0..=2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouletteBetType {
    Single,
    RedBlack,
    OddEven,
    HighLow,
    Dozen,
    Column,
}

/// The single blackjack decision a round is played with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlackjackAction {
    Hit,
    Stand,
    Double,
}

/// The single poker decision a round is played with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PokerAction {
    Fold,
    Check,
    Call,
    Raise,
}

/// Plinko risk tier, selecting the bucket multiplier table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Game-specific bet payload, keyed by game id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Choice {
    Roulette {
        bet_type: RouletteBetType,
        selected_numbers: Vec<u8>,
    },
    Blackjack {
        action: BlackjackAction,
    },
    Poker {
        action: PokerAction,
    },
    Plinko {
        risk_level: RiskLevel,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_position: Option<u8>,
    },
    Slots {
        active_lines: u8,
    },
}

impl Choice {
    /// The game this choice belongs to. Must agree with the request's
    /// game id; validation rejects mismatches before any randomness.
    pub fn game_type(&self) -> GameType {
        match self {
            Choice::Roulette { .. } => GameType::Roulette,
            Choice::Blackjack { .. } => GameType::Blackjack,
            Choice::Poker { .. } => GameType::Poker,
            Choice::Plinko { .. } => GameType::Plinko,
            Choice::Slots { .. } => GameType::Slots,
        }
    }
}

/// One round's input: consumed by exactly one engine invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BetRequest {
    #[serde(rename = "gameId")]
    pub game: GameType,
    #[serde(rename = "playerId")]
    pub player: PlayerId,
    #[serde(rename = "betAmount")]
    pub amount: u64,
    pub choice: Choice,
}
