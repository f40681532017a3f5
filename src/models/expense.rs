use anyhow::{bail, Result};
use chrono::{DateTime, Local, Utc};
use rust_decimal::Decimal;

/// A single ledger entry. The store is append-only: once written, an
/// expense is never updated or deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: Option<i64>,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    /// Assigned by the store at insert time.
    pub timestamp: DateTime<Utc>,
}

impl Expense {
    /// Calendar date of this expense in the local timezone, "YYYY-MM-DD".
    pub fn local_date(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d")
            .to_string()
    }

    /// Clock time of this expense in the local timezone, "HH:MM".
    pub fn local_time(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }
}

/// A validated expense ready to be written.
///
/// Construction is the single validation gate shared by the entry form and
/// the CLI `add` subcommand: input rejected here never reaches the store.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub amount: Decimal,
    pub category: String,
    pub description: String,
}

impl NewExpense {
    pub fn from_input(amount: &str, category: &str, description: &str) -> Result<Self> {
        let amount = amount.trim();
        if amount.is_empty() {
            bail!("amount is required");
        }
        let category = category.trim();
        if category.is_empty() {
            bail!("category is required");
        }
        let Ok(amount) = amount.parse::<Decimal>() else {
            bail!("'{amount}' is not a number");
        };
        Ok(Self {
            amount,
            category: category.to_string(),
            description: description.trim().to_string(),
        })
    }
}
