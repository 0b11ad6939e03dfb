//! Financial snapshot
//!
//! Reduces raw Pluggy accounts and transactions into summary totals.
//! Pure and infallible: numeric fields that are missing or unusable
//! count as zero.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::pluggy::Record;

use super::DateWindow;

/// Aggregate totals plus the records they were computed from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub user_id: String,
    pub item_id: String,
    pub total_balance: f64,
    pub cash_flow: CashFlow,
    pub summary: Summary,
    pub raw: RawRecords,
}

/// Transaction movement over the fetched window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlow {
    /// Sum of positive amounts (>= 0)
    pub total_inflow: f64,
    /// Sum of negative amounts, sign preserved (<= 0)
    pub total_outflow: f64,
    /// `total_inflow + total_outflow`
    pub net_movement: f64,
    #[serde(flatten)]
    pub window: Option<DateWindow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub account_count: usize,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRecords {
    pub accounts: Vec<Record>,
    pub transactions: Vec<Record>,
}

/// Build a snapshot from already-fetched records
pub fn build_snapshot(
    user_id: impl Into<String>,
    item_id: impl Into<String>,
    accounts: Vec<Record>,
    transactions: Vec<Record>,
    window: Option<DateWindow>,
) -> Snapshot {
    let total_balance = accounts
        .iter()
        .map(account_balance)
        .fold(0.0, |total, balance| total + balance);

    let (total_inflow, total_outflow) = transactions.iter().map(transaction_amount).fold(
        (0.0, 0.0),
        |(inflow, outflow), amount| {
            if amount > 0.0 {
                (inflow + amount, outflow)
            } else if amount < 0.0 {
                (inflow, outflow + amount)
            } else {
                (inflow, outflow)
            }
        },
    );

    Snapshot {
        user_id: user_id.into(),
        item_id: item_id.into(),
        total_balance,
        cash_flow: CashFlow {
            total_inflow,
            total_outflow,
            net_movement: total_inflow + total_outflow,
            window,
        },
        summary: Summary {
            account_count: accounts.len(),
            transaction_count: transactions.len(),
        },
        raw: RawRecords {
            accounts,
            transactions,
        },
    }
}

/// Balance of one account.
///
/// Accepts a scalar `balance` or an object with `current`, falling back
/// to `available`.
pub fn account_balance(account: &Record) -> f64 {
    match account.get("balance") {
        Some(JsonValue::Object(nested)) => nested
            .get("current")
            .and_then(as_number)
            .or_else(|| nested.get("available").and_then(as_number))
            .unwrap_or(0.0),
        Some(value) => as_number(value).unwrap_or(0.0),
        None => 0.0,
    }
}

/// Signed amount of one transaction (positive = inflow)
pub fn transaction_amount(transaction: &Record) -> f64 {
    transaction
        .get("amount")
        .and_then(as_number)
        .unwrap_or(0.0)
}

/// Numbers and numeric strings, finite only
fn as_number(value: &JsonValue) -> Option<f64> {
    let number = match value {
        JsonValue::Number(n) => n.as_f64()?,
        JsonValue::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}
