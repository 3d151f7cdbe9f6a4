//! Wire DTOs for the transactions API.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently;
//! integration tests catch drift between the two crates. Numeric and date
//! fields of a transaction stay strings here, since that is how the API sends
//! them. Turning them into numbers and dates is the mapper's job.

use serde::{Deserialize, Serialize};

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Outcome,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Outcome => "outcome",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWire {
    pub title: String,
}

/// A transaction as received from `GET /transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionWire {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub value: String,
    pub created_at: String,
    pub category: CategoryWire,
}

/// Account totals as received from `GET /transactions`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceWire {
    pub income: f64,
    pub outcome: f64,
    pub total: f64,
}

/// Body of `GET /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionWire>,
    pub balance: BalanceWire,
}
