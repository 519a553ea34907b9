//! Service layer for spendwatch
//!
//! Business logic on top of the storage layer and the gateway boundary:
//! device registration, alert dispatch, and the budget evaluation pipeline.

pub mod device;
pub mod dispatch;
pub mod evaluate;

pub use device::DeviceService;
pub use dispatch::{DispatchResult, NotificationDispatcher};
pub use evaluate::BudgetMonitor;
