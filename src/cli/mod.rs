//! CLI command handlers
//!
//! Thin layer between clap and the service layer: parse operands, call the
//! service, print the outcome.

pub mod budget;
pub mod device;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use device::{handle_device_command, DeviceCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::{SpendwatchError, SpendwatchResult};
use crate::models::{Amount, CategoryId, Platform, RecurrencePeriod, UserId};

/// Parse a user ID operand
pub(crate) fn parse_user(s: &str) -> SpendwatchResult<UserId> {
    s.parse()
        .map_err(|e| SpendwatchError::Validation(format!("Invalid user ID: {}", e)))
}

/// Parse a category ID operand
pub(crate) fn parse_category(s: &str) -> SpendwatchResult<CategoryId> {
    s.parse()
        .map_err(|e| SpendwatchError::Validation(format!("Invalid category ID: {}", e)))
}

/// Parse an amount operand
pub(crate) fn parse_amount(s: &str) -> SpendwatchResult<Amount> {
    Amount::parse(s).map_err(|e| SpendwatchError::Validation(e.to_string()))
}

/// Parse a recurrence period operand
pub(crate) fn parse_period(s: &str) -> SpendwatchResult<RecurrencePeriod> {
    s.parse()
        .map_err(|e: crate::models::period::PeriodParseError| {
            SpendwatchError::Validation(e.to_string())
        })
}

/// Parse a platform operand
pub(crate) fn parse_platform(s: &str) -> SpendwatchResult<Platform> {
    s.parse()
        .map_err(|e: crate::models::device::PlatformParseError| {
            SpendwatchError::Validation(e.to_string())
        })
}
