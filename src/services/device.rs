//! Device registration service
//!
//! The exposed register/unregister operations over the token registry.

use log::info;

use crate::error::{SpendwatchError, SpendwatchResult};
use crate::models::{DeviceToken, Platform, UserId};
use crate::storage::DeviceTokenRepository;

/// Service for device token registration
pub struct DeviceService<'a> {
    devices: &'a DeviceTokenRepository,
}

impl<'a> DeviceService<'a> {
    /// Create a new device service
    pub fn new(devices: &'a DeviceTokenRepository) -> Self {
        Self { devices }
    }

    /// Register a device token for a user
    ///
    /// Idempotent: re-registering an existing token updates its owner and
    /// platform instead of creating a duplicate row.
    pub fn register_device(
        &self,
        user_id: UserId,
        token: &str,
        platform: Platform,
    ) -> SpendwatchResult<DeviceToken> {
        if token.trim().is_empty() {
            return Err(SpendwatchError::Validation(
                "Device token cannot be empty".into(),
            ));
        }

        let device = self.devices.upsert(token, user_id, platform)?;
        self.devices.save()?;

        info!("registered {} device for user {}", platform, user_id);
        Ok(device)
    }

    /// Unregister a device token
    ///
    /// Idempotent: unregistering an unknown token is a no-op.
    pub fn unregister_device(&self, token: &str) -> SpendwatchResult<()> {
        self.devices.delete_by_token(token)?;
        self.devices.save()?;

        info!("unregistered device token");
        Ok(())
    }
}
