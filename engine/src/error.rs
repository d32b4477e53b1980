//! Engine error taxonomy.
//!
//! Every variant is recoverable at the calling layer and carries a
//! user-surfaceable message. Nothing here should crash the process.
//! The one fatal condition, a ledger balance diverging from its
//! transaction log, is raised by [`crate::ledger::Ledger::audit`]
//! directly: that is data corruption, not bad input.

use thiserror::Error as ThisError;

use velvet_types::PlayerId;

/// Why a bet was rejected. Rejection happens before any randomness is
/// drawn and leaves all state untouched.
#[derive(Debug, Clone, ThisError, PartialEq, Eq)]
pub enum BetError {
    #[error("amount must be positive")]
    NonPositive,
    #[error("bet {amount} below the table minimum {min}")]
    BelowMinimum { amount: u64, min: u64 },
    #[error("bet {amount} above the table maximum {max}")]
    AboveMaximum { amount: u64, max: u64 },
    #[error("stake {required} exceeds balance {available}")]
    InsufficientBalance { required: u64, available: u64 },
    #[error("unknown player {player}")]
    UnknownPlayer { player: PlayerId },
}

/// Error during round resolution.
#[derive(Debug, Clone, ThisError, PartialEq, Eq)]
pub enum EngineError {
    /// The bet itself is unacceptable (amount, limits, balance).
    #[error("invalid bet: {0}")]
    InvalidBet(#[from] BetError),
    /// Server-side configuration fault: the round aborts with no
    /// ledger mutation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    /// The requested action is malformed or not allowed right now.
    #[error("illegal action: {0}")]
    IllegalAction(&'static str),
    /// An engine tried to deal past the deck. The per-round deal sizes
    /// make this unreachable; seeing it means a broken contract.
    #[error("deck exhausted")]
    DeckExhausted,
}
