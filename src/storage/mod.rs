//! Storage layer for spendwatch
//!
//! JSON file storage with atomic writes, following one file per entity
//! collection under the data directory.

pub mod budgets;
pub mod devices;
pub mod file_io;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use devices::DeviceTokenRepository;
pub use file_io::{read_json, write_json_atomic};
pub use transactions::TransactionRepository;

use crate::config::paths::SpendwatchPaths;
use crate::error::SpendwatchError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SpendwatchPaths,
    pub budgets: BudgetRepository,
    pub transactions: TransactionRepository,
    pub devices: DeviceTokenRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: SpendwatchPaths) -> Result<Self, SpendwatchError> {
        paths.ensure_directories()?;

        Ok(Self {
            budgets: BudgetRepository::new(paths.budgets_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            devices: DeviceTokenRepository::new(paths.devices_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &SpendwatchPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), SpendwatchError> {
        self.budgets.load()?;
        self.transactions.load()?;
        self.devices.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SpendwatchError> {
        self.budgets.save()?;
        self.transactions.save()?;
        self.devices.save()?;
        Ok(())
    }
}
