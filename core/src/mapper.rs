//! Wire records to display records.
//!
//! Both functions are pure. They fail with a [`MapError`] when a value or
//! date string is malformed, or an amount is too large to format; callers
//! decide what to drop.
//! Neither function adds the outcome `"- "` marker, that belongs to the table.

use chrono::{DateTime, Utc};

use crate::error::MapError;
use crate::format::{format_currency, format_date, parse_timestamp, parse_value};
use crate::types::{BalanceWire, TransactionKind, TransactionWire};

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionView {
    pub id: String,
    pub title: String,
    pub kind: TransactionKind,
    pub value: f64,
    pub formatted_value: String,
    pub formatted_date: String,
    pub created_at: DateTime<Utc>,
    pub category: String,
}

/// Account totals, each already rendered as currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceView {
    pub income: String,
    pub outcome: String,
    pub total: String,
}

pub fn to_transaction_view(wire: &TransactionWire) -> Result<TransactionView, MapError> {
    let value = parse_value(&wire.value).ok_or_else(|| MapError::InvalidValue {
        id: wire.id.clone(),
        value: wire.value.clone(),
    })?;
    let formatted_value = format_currency(value).ok_or_else(|| MapError::InvalidValue {
        id: wire.id.clone(),
        value: wire.value.clone(),
    })?;
    let created_at = parse_timestamp(&wire.created_at).ok_or_else(|| MapError::InvalidDate {
        id: wire.id.clone(),
        created_at: wire.created_at.clone(),
    })?;

    Ok(TransactionView {
        id: wire.id.clone(),
        title: wire.title.clone(),
        kind: wire.kind,
        value,
        formatted_value,
        formatted_date: format_date(&created_at),
        created_at,
        category: wire.category.title.clone(),
    })
}

pub fn to_balance_view(wire: &BalanceWire) -> Result<BalanceView, MapError> {
    Ok(BalanceView {
        income: balance_field("income", wire.income)?,
        outcome: balance_field("outcome", wire.outcome)?,
        total: balance_field("total", wire.total)?,
    })
}

fn balance_field(field: &'static str, value: f64) -> Result<String, MapError> {
    format_currency(value).ok_or_else(|| MapError::InvalidBalance {
        field,
        value: value.to_string(),
    })
}
