//! House rules and the game registry.
//!
//! The registry maintains:
//! - Static game metadata (names, descriptions, categories)
//! - Per-game house rules (bet limits, house edge) mutable at runtime
//!   by the administrative path
//! - Active/inactive status for each game
//!
//! Engines read a copy of the current rules at the start of a round and
//! hold it fixed for the round; admin writes take effect for subsequent
//! rounds only.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::bet::GameType;
use crate::outcome::MULTIPLIER_SCALE;

/// Upper bound for a configured house edge (100%).
pub const MAX_HOUSE_EDGE_BPS: u16 = MULTIPLIER_SCALE as u16;

/// Per-game tunable rules the engines must honor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseRules {
    /// Minimum bet (in chips).
    pub min_bet: u64,
    /// Maximum bet (in chips).
    pub max_bet: u64,
    /// House edge as basis points (e.g. 270 = 2.70%).
    pub house_edge_bps: u16,
}

impl HouseRules {
    /// Win probability implied by the edge, in basis points.
    pub fn win_probability_bps(&self) -> u16 {
        MAX_HOUSE_EDGE_BPS - self.house_edge_bps
    }

    /// Payout scaling factor `1 - edge`, in basis points. Slots applies
    /// this to every line win to realize the configured edge.
    pub fn house_adjustment_bps(&self) -> u64 {
        (MAX_HOUSE_EDGE_BPS - self.house_edge_bps) as u64
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.house_edge_bps > MAX_HOUSE_EDGE_BPS {
            return Err(RulesError::EdgeOutOfRange {
                got: self.house_edge_bps,
                max: MAX_HOUSE_EDGE_BPS,
            });
        }
        if self.min_bet == 0 || self.min_bet > self.max_bet {
            return Err(RulesError::InvalidLimits {
                min: self.min_bet,
                max: self.max_bet,
            });
        }
        Ok(())
    }
}

/// Errors from registry lookups and admin mutations.
#[derive(Debug, Clone, ThisError, PartialEq, Eq)]
pub enum RulesError {
    #[error("house edge {got} exceeds {max} basis points")]
    EdgeOutOfRange { got: u16, max: u16 },
    #[error("bet limits invalid (min={min}, max={max})")]
    InvalidLimits { min: u64, max: u64 },
    #[error("no rules registered for {game}")]
    UnknownGame { game: GameType },
}

/// Category for UI grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameCategory {
    /// Card games against the dealer (Blackjack, Poker).
    Cards,
    /// Table games (Roulette).
    Table,
    /// Arcade-style games (Plinko, Slots).
    Arcade,
}

/// Metadata about a game for UI display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameInfo {
    /// Game type identifier.
    pub game_type: GameType,
    /// Display name.
    pub name: &'static str,
    /// Short description.
    pub description: &'static str,
    /// Category for UI grouping.
    pub category: GameCategory,
}

impl GameInfo {
    const fn new(
        game_type: GameType,
        name: &'static str,
        description: &'static str,
        category: GameCategory,
    ) -> Self {
        Self {
            game_type,
            name,
            description,
            category,
        }
    }
}

/// Default rules for a game type, used to seed the registry.
fn default_rules(game_type: GameType) -> HouseRules {
    match game_type {
        GameType::Roulette => HouseRules {
            min_bet: 10,
            max_bet: 1_000,
            house_edge_bps: 270, // 2.70% European
        },
        GameType::Blackjack => HouseRules {
            min_bet: 20,
            max_bet: 1_000,
            house_edge_bps: 100, // 1.00%
        },
        GameType::Poker => HouseRules {
            min_bet: 50,
            max_bet: 2_000,
            house_edge_bps: 250, // 2.50%
        },
        GameType::Plinko => HouseRules {
            min_bet: 10,
            max_bet: 500,
            house_edge_bps: 1_000, // 10.00%
        },
        GameType::Slots => HouseRules {
            min_bet: 1,
            max_bet: 100,
            house_edge_bps: 1_500, // 15.00%
        },
    }
}

/// Registry of available games, their metadata, and current rules.
#[derive(Clone, Debug)]
pub struct RulesStore {
    rules: HashMap<GameType, HouseRules>,
    active: HashMap<GameType, bool>,
}

impl Default for RulesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesStore {
    /// Create a registry with every game active under default rules.
    pub fn new() -> Self {
        let mut store = Self::empty();
        for game_type in GameType::ALL {
            store.rules.insert(game_type, default_rules(game_type));
            store.active.insert(game_type, true);
        }
        store
    }

    /// Create a registry with no games registered. Hosts that load
    /// persisted rules start here and [`RulesStore::upsert`] each
    /// record.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
            active: HashMap::new(),
        }
    }

    /// Register or replace a game's rules, activating the game if it
    /// was unknown.
    pub fn upsert(&mut self, game_type: GameType, rules: HouseRules) -> Result<(), RulesError> {
        rules.validate()?;
        self.rules.insert(game_type, rules);
        self.active.entry(game_type).or_insert(true);
        Ok(())
    }

    /// Get static metadata for a game type.
    pub fn get_info(game_type: GameType) -> GameInfo {
        match game_type {
            GameType::Roulette => GameInfo::new(
                GameType::Roulette,
                "Roulette",
                "Spin the single-zero wheel and bet on numbers or colors.",
                GameCategory::Table,
            ),
            GameType::Blackjack => GameInfo::new(
                GameType::Blackjack,
                "Blackjack",
                "Beat the dealer to 21 without going bust.",
                GameCategory::Cards,
            ),
            GameType::Poker => GameInfo::new(
                GameType::Poker,
                "Poker",
                "Heads-up hold'em against the dealer, simplified ranking.",
                GameCategory::Cards,
            ),
            GameType::Plinko => GameInfo::new(
                GameType::Plinko,
                "Plinko",
                "Drop the ball and follow it down to a multiplier bucket.",
                GameCategory::Arcade,
            ),
            GameType::Slots => GameInfo::new(
                GameType::Slots,
                "Slot Machine",
                "Five reels, wilds, and a fixed jackpot.",
                GameCategory::Arcade,
            ),
        }
    }

    /// Current rules for a game. Callers read once per round and hold
    /// the copy for that round's computation.
    pub fn rules(&self, game_type: GameType) -> Result<HouseRules, RulesError> {
        self.rules
            .get(&game_type)
            .copied()
            .ok_or(RulesError::UnknownGame { game: game_type })
    }

    pub fn is_active(&self, game_type: GameType) -> bool {
        self.active.get(&game_type).copied().unwrap_or(false)
    }

    /// Admin: retune a game's house edge. Returns the updated rules.
    pub fn set_house_edge(
        &mut self,
        game_type: GameType,
        house_edge_bps: u16,
    ) -> Result<HouseRules, RulesError> {
        let mut updated = self.rules(game_type)?;
        updated.house_edge_bps = house_edge_bps;
        updated.validate()?;
        self.rules.insert(game_type, updated);
        Ok(updated)
    }

    /// Admin: change a game's bet limits. Returns the updated rules.
    pub fn set_limits(
        &mut self,
        game_type: GameType,
        min_bet: u64,
        max_bet: u64,
    ) -> Result<HouseRules, RulesError> {
        let mut updated = self.rules(game_type)?;
        updated.min_bet = min_bet;
        updated.max_bet = max_bet;
        updated.validate()?;
        self.rules.insert(game_type, updated);
        Ok(updated)
    }

    /// Admin: enable or disable a game.
    pub fn set_active(&mut self, game_type: GameType, active: bool) -> Result<(), RulesError> {
        if !self.rules.contains_key(&game_type) {
            return Err(RulesError::UnknownGame { game: game_type });
        }
        self.active.insert(game_type, active);
        Ok(())
    }
}
