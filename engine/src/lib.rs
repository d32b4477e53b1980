//! Velvet outcome engine.
//!
//! This crate contains the payout-bearing logic of the casino: the
//! per-game outcome engines (roulette, blackjack, poker, plinko,
//! slots), the weighted random selector, deck primitives, and the chip
//! ledger with its single serialized settlement path.
//!
//! ## Determinism requirements
//! - Do not use wall-clock time inside round resolution; callers pass
//!   timestamps into ledger writes.
//! - Do not use ambient randomness; every draw comes from the round's
//!   [`GameRng`], seeded by the caller, so any outcome is replayable
//!   from `(seed, round_id)`.
//! - The animation layer never decides anything: engines compute the
//!   authoritative result first and the client is choreographed to it.
//!
//! ## Control flow
//! A caller builds a [`velvet_types::BetRequest`], then
//! [`round::play_round`] reads the current [`velvet_types::RulesStore`]
//! entry, validates the bet (before any randomness), dispatches to the
//! matching [`games::OutcomeEngine`], and settles the resulting
//! [`velvet_types::RoundOutcome`] through the [`ledger::Ledger`].

pub mod deck;
pub mod error;
pub mod games;
pub mod ledger;
pub mod rng;
pub mod round;
pub mod selector;

pub use deck::Deck;
pub use error::{BetError, EngineError};
pub use games::{resolve_round, OutcomeEngine};
pub use ledger::Ledger;
pub use rng::GameRng;
pub use round::{play_round, validate_bet};
pub use selector::{biased_coin, pick_weighted};
