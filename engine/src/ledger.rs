//! The chip ledger: accounts, balances, and the transaction log.
//!
//! Every balance mutation goes through one of the `&mut self` entry
//! points here, so rounds for the same player serialize through
//! ownership: there is no other path to a balance. The transaction
//! log is append-only and a player's cached balance must equal its
//! signed sum at every point; [`Ledger::audit`] recomputes the sum and
//! halts on divergence, since that means engine-level data corruption
//! rather than bad input.

use std::collections::HashMap;

use velvet_types::{
    Account, PlayerId, RoundOutcome, Transaction, TransactionKind, STARTING_BALANCE,
};

use crate::error::{BetError, EngineError};

/// Owner of all player accounts.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    accounts: HashMap<PlayerId, Account>,
    next_transaction_id: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            next_transaction_id: 1,
        }
    }

    /// Open an account with the starting balance. The opening grant is
    /// written as a deposit transaction so the balance invariant holds
    /// from the first record.
    pub fn open_account(&mut self, player: PlayerId, now: u64) -> Result<Transaction, EngineError> {
        if self.accounts.contains_key(&player) {
            return Err(EngineError::IllegalAction("account already exists"));
        }
        self.accounts.insert(player, Account::default());
        self.append(
            player,
            STARTING_BALANCE as i64,
            "opening balance".to_string(),
            TransactionKind::Deposit,
            now,
        )
    }

    pub fn account(&self, player: PlayerId) -> Option<&Account> {
        self.accounts.get(&player)
    }

    pub fn balance(&self, player: PlayerId) -> Result<u64, EngineError> {
        self.accounts
            .get(&player)
            .map(|account| account.balance)
            .ok_or(EngineError::InvalidBet(BetError::UnknownPlayer { player }))
    }

    /// Credit chips from an external source.
    pub fn deposit(
        &mut self,
        player: PlayerId,
        amount: u64,
        description: String,
        now: u64,
    ) -> Result<Transaction, EngineError> {
        self.ensure_positive(amount)?;
        self.ensure_known(player)?;
        self.append(
            player,
            amount as i64,
            description,
            TransactionKind::Deposit,
            now,
        )
    }

    /// Debit chips to an external destination. Overdrafts are rejected
    /// before anything is written.
    pub fn withdraw(
        &mut self,
        player: PlayerId,
        amount: u64,
        description: String,
        now: u64,
    ) -> Result<Transaction, EngineError> {
        self.ensure_positive(amount)?;
        self.ensure_affordable(player, amount)?;
        self.append(
            player,
            -(amount as i64),
            description,
            TransactionKind::Withdrawal,
            now,
        )
    }

    /// Debit chips for a marketplace purchase.
    pub fn purchase(
        &mut self,
        player: PlayerId,
        cost: u64,
        description: String,
        now: u64,
    ) -> Result<Transaction, EngineError> {
        self.ensure_positive(cost)?;
        self.ensure_affordable(player, cost)?;
        self.append(
            player,
            -(cost as i64),
            description,
            TransactionKind::Purchase,
            now,
        )
    }

    /// Apply a resolved round: debit the stake, credit the win, and
    /// append exactly one game transaction with the net effect.
    ///
    /// Affordability was checked during bet validation; this re-checks
    /// and refuses (never clamps) so a balance can not go negative
    /// through this call even if a caller skipped validation.
    pub fn apply_outcome(
        &mut self,
        player: PlayerId,
        outcome: &RoundOutcome,
        now: u64,
    ) -> Result<Transaction, EngineError> {
        self.ensure_affordable(player, outcome.total_staked)?;

        let word = if outcome.is_win {
            "win"
        } else if outcome.is_push() {
            "push"
        } else {
            "loss"
        };
        let description = format!("{} {}", outcome.game(), word);

        let transaction = self.append(
            player,
            outcome.net_amount(),
            description,
            TransactionKind::Game,
            now,
        )?;
        tracing::debug!(
            player = player,
            game = %outcome.game(),
            net = transaction.amount,
            "ledger outcome applied"
        );
        Ok(transaction)
    }

    /// Recompute a player's balance from their transaction log.
    ///
    /// Divergence between the cached balance and the recomputed sum is
    /// engine-level data corruption: this halts with diagnostics
    /// rather than letting the ledger keep running on bad state.
    pub fn audit(&self, player: PlayerId) -> Result<u64, EngineError> {
        let account = self
            .accounts
            .get(&player)
            .ok_or(EngineError::InvalidBet(BetError::UnknownPlayer { player }))?;
        match account.derived_balance() {
            Some(derived) if derived == account.balance => Ok(derived),
            derived => panic!(
                "ledger corruption for player {player}: cached balance {} vs derived {:?}",
                account.balance, derived
            ),
        }
    }

    fn ensure_positive(&self, amount: u64) -> Result<(), EngineError> {
        if amount == 0 {
            return Err(EngineError::InvalidBet(BetError::NonPositive));
        }
        Ok(())
    }

    fn ensure_known(&self, player: PlayerId) -> Result<(), EngineError> {
        if !self.accounts.contains_key(&player) {
            return Err(EngineError::InvalidBet(BetError::UnknownPlayer { player }));
        }
        Ok(())
    }

    fn ensure_affordable(&self, player: PlayerId, required: u64) -> Result<(), EngineError> {
        let available = self.balance(player)?;
        if required > available {
            return Err(EngineError::InvalidBet(BetError::InsufficientBalance {
                required,
                available,
            }));
        }
        Ok(())
    }

    /// Append one transaction and update the cached balance. The
    /// affordability checks above guarantee the new balance is
    /// representable.
    fn append(
        &mut self,
        player: PlayerId,
        amount: i64,
        description: String,
        kind: TransactionKind,
        now: u64,
    ) -> Result<Transaction, EngineError> {
        let account = self
            .accounts
            .get_mut(&player)
            .ok_or(EngineError::InvalidBet(BetError::UnknownPlayer { player }))?;

        let new_balance = account.balance as i128 + amount as i128;
        if new_balance < 0 || new_balance > u64::MAX as i128 {
            return Err(EngineError::InvalidBet(BetError::InsufficientBalance {
                required: amount.unsigned_abs(),
                available: account.balance,
            }));
        }

        let id = self.next_transaction_id;
        self.next_transaction_id += 1;
        account.balance = new_balance as u64;
        let transaction = Transaction {
            id,
            player,
            amount,
            description,
            kind,
            timestamp: now,
        };
        account.transactions.push(transaction.clone());
        Ok(transaction)
    }
}
