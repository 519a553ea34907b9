//! Device CLI commands
//!
//! Registration and unregistration of push-delivery tokens.

use clap::Subcommand;

use crate::cli::{parse_platform, parse_user};
use crate::error::SpendwatchResult;
use crate::services::DeviceService;
use crate::storage::Storage;

/// Device subcommands
#[derive(Subcommand)]
pub enum DeviceCommands {
    /// Register a device token for a user
    Register {
        /// User ID
        user: String,
        /// Push-delivery token
        token: String,
        /// Platform: ios, android or web
        #[arg(short, long, default_value = "android")]
        platform: String,
    },

    /// Unregister a device token
    Unregister {
        /// Push-delivery token
        token: String,
    },

    /// List a user's registered devices
    List {
        /// User ID
        user: String,
    },
}

/// Handle a device command
pub fn handle_device_command(storage: &Storage, cmd: DeviceCommands) -> SpendwatchResult<()> {
    let service = DeviceService::new(&storage.devices);

    match cmd {
        DeviceCommands::Register {
            user,
            token,
            platform,
        } => {
            let user = parse_user(&user)?;
            let platform = parse_platform(&platform)?;
            let device = service.register_device(user, &token, platform)?;
            println!("Registered {} device for {}", device.platform, user);
        }
        DeviceCommands::Unregister { token } => {
            service.unregister_device(&token)?;
            println!("Unregistered device token");
        }
        DeviceCommands::List { user } => {
            let user = parse_user(&user)?;
            let devices = storage.devices.list_by_user(user)?;
            if devices.is_empty() {
                println!("No devices registered for {}", user);
            } else {
                for device in devices {
                    println!(
                        "{}  {}  registered {}",
                        device.token,
                        device.platform,
                        device.registered_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }
    }

    Ok(())
}
