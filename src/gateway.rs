//! Push gateway boundary
//!
//! The delivery transport itself is outside this crate; the pipeline talks
//! to a multicast gateway that reports one outcome per token. Raw gateway
//! error codes are translated into a closed enum here, at the edge, so the
//! dispatcher never string-matches provider codes.

use std::collections::HashMap;

use log::info;
use thiserror::Error;

use crate::error::SpendwatchResult;

/// Content of one push notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessage {
    /// Short title shown in the notification tray
    pub title: String,

    /// Body text
    pub body: String,

    /// Opaque key/value payload forwarded to the client app (deep links)
    pub data: HashMap<String, String>,
}

impl PushMessage {
    /// Create a message with an empty data payload
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            data: HashMap::new(),
        }
    }

    /// Attach a data payload entry
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Why delivery to one token failed
///
/// Closed enumeration of the delivery-failure kinds the pipeline reacts to.
/// `is_permanent` decides pruning: a permanent failure means the token will
/// never succeed again (app uninstalled, token revoked).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The token is no longer registered with the push service
    #[error("token not registered")]
    TokenNotRegistered,

    /// The token value is malformed or revoked
    #[error("invalid token")]
    InvalidToken,

    /// The push service could not be reached or answered 5xx
    #[error("push service unavailable")]
    Unavailable,

    /// Any other per-token rejection
    #[error("delivery rejected: {0}")]
    Rejected(String),
}

impl DeliveryError {
    /// Translate a raw gateway error code
    ///
    /// Accepts codes with or without the `messaging/` namespace prefix the
    /// FCM-style gateways use. Unknown codes map to `Rejected`, which is
    /// treated as transient.
    pub fn from_code(code: &str) -> Self {
        let code = code.strip_prefix("messaging/").unwrap_or(code);
        match code {
            "registration-token-not-registered" | "token-not-registered" => {
                Self::TokenNotRegistered
            }
            "invalid-registration-token" | "invalid-token" => Self::InvalidToken,
            "unavailable" | "internal-error" | "server-unavailable" => Self::Unavailable,
            other => Self::Rejected(other.to_string()),
        }
    }

    /// Check whether this failure warrants deleting the token
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::TokenNotRegistered | Self::InvalidToken)
    }
}

/// Outcome of delivery to one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// The token this outcome is for
    pub token: String,

    /// None on success, the categorized failure otherwise
    pub error: Option<DeliveryError>,
}

impl DeliveryReceipt {
    /// A successful delivery
    pub fn success(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            error: None,
        }
    }

    /// A failed delivery
    pub fn failure(token: impl Into<String>, error: DeliveryError) -> Self {
        Self {
            token: token.into(),
            error: Some(error),
        }
    }

    /// Check if the delivery succeeded
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Best-effort multicast push delivery
///
/// One send carries all of a user's tokens and yields one receipt per
/// token, in any order. Implementations must bound the send with a timeout;
/// a transport-level failure (timeout, unreachable service) is returned as
/// an `Err` and the caller degrades to reporting it without pruning.
pub trait PushGateway {
    /// Send `message` to every token, returning one receipt per token
    fn send_multicast(
        &self,
        tokens: &[String],
        message: &PushMessage,
    ) -> SpendwatchResult<Vec<DeliveryReceipt>>;
}

/// Gateway stand-in that prints deliveries to the log and succeeds
///
/// Used by the binary; the real transport lives outside this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleGateway;

impl PushGateway for ConsoleGateway {
    fn send_multicast(
        &self,
        tokens: &[String],
        message: &PushMessage,
    ) -> SpendwatchResult<Vec<DeliveryReceipt>> {
        for token in tokens {
            info!("push to {}: {} - {}", token, message.title, message.body);
        }
        Ok(tokens
            .iter()
            .map(|t| DeliveryReceipt::success(t.clone()))
            .collect())
    }
}
