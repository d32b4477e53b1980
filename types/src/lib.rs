//! Common types for the velvet casino engine.
//!
//! This crate holds the data model shared by the engine and its callers:
//! cards, bet requests and per-game choice payloads, round outcomes,
//! house rules, and the transaction ledger records. Everything here is
//! plain data; the algorithms live in `velvet-engine`.
//!
//! All public types serialize to JSON via serde, with camelCase field
//! names matching the HTTP layer's wire format.

pub mod bet;
pub mod cards;
pub mod ledger;
pub mod outcome;
pub mod rules;

pub use bet::{
    BetRequest, BlackjackAction, Choice, GameType, PlayerId, PokerAction, RiskLevel,
    RouletteBetType,
};
pub use cards::{Card, Rank, Suit};
pub use ledger::{Account, Transaction, TransactionKind, STARTING_BALANCE};
pub use outcome::{
    BlackjackData, HandCategory, HandRank, OutcomeData, PlinkoData, PocketColor, PokerData,
    RouletteData, RoundOutcome, SlotsData, WinningLine, MULTIPLIER_SCALE,
};
pub use rules::{GameCategory, GameInfo, HouseRules, RulesError, RulesStore};
