//! Core data models for spendwatch

pub mod budget;
pub mod device;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{Budget, BudgetStatus, Classification};
pub use device::{DeviceToken, Platform};
pub use ids::{BudgetId, CategoryId, TransactionId, UserId};
pub use money::Amount;
pub use period::RecurrencePeriod;
pub use transaction::{Transaction, TransactionKind};
