//! Device token model
//!
//! A token is an opaque push-delivery address identifying one installed app
//! instance. Token values are globally unique: re-registering a known token
//! under a different user reassigns ownership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::UserId;

/// Platform a device token was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Web,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ios => write!(f, "ios"),
            Self::Android => write!(f, "android"),
            Self::Web => write!(f, "web"),
        }
    }
}

impl FromStr for Platform {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            "web" => Ok(Self::Web),
            other => Err(PlatformParseError::UnknownPlatform(other.to_string())),
        }
    }
}

/// A registered push-delivery address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceToken {
    /// The opaque token value; unique across all users
    pub token: String,

    /// Current owner
    pub user_id: UserId,

    /// Platform tag
    pub platform: Platform,

    /// When the token was last (re-)registered
    pub registered_at: DateTime<Utc>,
}

impl DeviceToken {
    /// Create a new device token registration
    pub fn new(token: impl Into<String>, user_id: UserId, platform: Platform) -> Self {
        Self {
            token: token.into(),
            user_id,
            platform,
            registered_at: Utc::now(),
        }
    }
}

/// Error type for platform parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformParseError {
    UnknownPlatform(String),
}

impl fmt::Display for PlatformParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformParseError::UnknownPlatform(s) => {
                write!(f, "Unknown platform '{}' (expected ios, android or web)", s)
            }
        }
    }
}

impl std::error::Error for PlatformParseError {}
