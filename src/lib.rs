//! spendwatch - budget threshold monitoring and push alert fan-out
//!
//! This library implements the alerting subsystem of a personal-finance
//! tracker: when a transaction is written, every applicable budget is
//! evaluated against the spend aggregate for its own recurrence window, and
//! alerts are multicast to all of the user's registered devices. Tokens the
//! push gateway reports as permanently dead are pruned automatically.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (budgets, transactions, device tokens)
//! - `clock`: Injected time source for deterministic window computation
//! - `stores`: Read-side store contracts consumed by the pipeline
//! - `gateway`: Push gateway boundary and delivery-failure taxonomy
//! - `storage`: JSON file storage layer (including the token registry)
//! - `services`: Business logic (registration, dispatch, evaluation)
//! - `cli`: Command handlers for the `spendwatch` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use spendwatch::services::{BudgetMonitor, NotificationDispatcher};
//!
//! let dispatcher = NotificationDispatcher::new(&gateway, &storage.devices, &settings);
//! let monitor = BudgetMonitor::new(&storage.budgets, &storage.transactions, dispatcher, &clock);
//! monitor.on_transaction_written(user_id, category_id);
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod services;
pub mod storage;
pub mod stores;

pub use error::{SpendwatchError, SpendwatchResult};
