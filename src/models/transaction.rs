//! Transaction model
//!
//! Transactions are read-only to the alerting core: their mutation events
//! trigger evaluation, and only `expense` transactions contribute to spend
//! aggregates.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TransactionId, UserId};
use super::money::Amount;

/// The signed kind of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in; never counted toward budgets
    Income,
    /// Money going out; the only kind that feeds spend aggregates
    #[default]
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The user this transaction belongs to
    pub user_id: UserId,

    /// The category the transaction was recorded against
    pub category_id: CategoryId,

    /// Income or expense
    #[serde(default)]
    pub kind: TransactionKind,

    /// Amount in minor units; always non-negative, the kind carries the sign
    pub amount: Amount,

    /// When the transaction occurred (local time)
    pub occurred_at: NaiveDateTime,

    /// Free-form note
    #[serde(default)]
    pub note: String,

    /// When the transaction was recorded
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        user_id: UserId,
        category_id: CategoryId,
        kind: TransactionKind,
        amount: Amount,
        occurred_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            category_id,
            kind,
            amount,
            occurred_at,
            note: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Check if this transaction counts toward spend aggregates
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount);
        }
        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Transaction amount cannot be negative"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
