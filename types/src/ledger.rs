//! Ledger records: transactions and cached account balances.
//!
//! The transaction log is append-only; a player's balance is a cached
//! derivation that must always equal the signed sum of their
//! transactions. The opening grant is itself a deposit transaction, so
//! the invariant holds from the first record. Mutation logic lives in
//! `velvet-engine`; these are the durable shapes.

use serde::{Deserialize, Serialize};

use crate::bet::PlayerId;

/// Chips granted when an account is opened.
pub const STARTING_BALANCE: u64 = 2_500;

/// Transaction classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Game,
    Purchase,
}

/// One append-only ledger record. `amount` is the signed net effect on
/// the balance (a game round writes `win_amount - total_staked`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    #[serde(rename = "playerId")]
    pub player: PlayerId,
    pub amount: i64,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub timestamp: u64,
}

/// A player's account: cached balance plus their transaction history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub balance: u64,
    pub transactions: Vec<Transaction>,
}

impl Account {
    /// Recompute the balance from the transaction log. `None` means the
    /// log itself is inconsistent (a prefix dips below zero).
    pub fn derived_balance(&self) -> Option<u64> {
        let mut sum: i128 = 0;
        for tx in &self.transactions {
            sum += tx.amount as i128;
            if sum < 0 {
                return None;
            }
        }
        u64::try_from(sum).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: u64, amount: i64, kind: TransactionKind) -> Transaction {
        Transaction {
            id,
            player: 1,
            amount,
            description: String::new(),
            kind,
            timestamp: 0,
        }
    }

    #[test]
    fn test_derived_balance() {
        let account = Account {
            balance: 2_600,
            transactions: vec![
                tx(1, 2_500, TransactionKind::Deposit),
                tx(2, -400, TransactionKind::Game),
                tx(3, 500, TransactionKind::Game),
            ],
        };
        assert_eq!(account.derived_balance(), Some(2_600));
    }

    #[test]
    fn test_derived_balance_detects_negative_prefix() {
        let account = Account {
            balance: 100,
            transactions: vec![
                tx(1, -400, TransactionKind::Game),
                tx(2, 500, TransactionKind::Deposit),
            ],
        };
        assert_eq!(account.derived_balance(), None);
    }

    #[test]
    fn test_transaction_wire_format() {
        let record = tx(9, -150, TransactionKind::Purchase);
        let json = serde_json::to_string(&record).expect("serialize failed");
        assert!(json.contains(r#""type":"purchase""#));
        assert!(json.contains(r#""playerId":1"#));
        assert!(json.contains(r#""amount":-150"#));
    }
}
