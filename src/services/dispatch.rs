//! Notification dispatch service
//!
//! Renders alert content for a budget status, multicasts it to every device
//! a user has registered, and self-heals the token registry: tokens the
//! gateway reports as permanently dead are pruned in one batch. Partial
//! failure is a normal outcome, never an error.

use log::{debug, info, warn};

use crate::config::Settings;
use crate::error::SpendwatchResult;
use crate::gateway::{PushGateway, PushMessage};
use crate::models::{Budget, BudgetStatus, Classification, UserId};
use crate::storage::DeviceTokenRepository;

/// Outcome of one dispatch attempt
#[derive(Debug, Clone, Default)]
pub struct DispatchResult {
    /// Number of tokens the multicast carried
    pub attempted: usize,

    /// Tokens that accepted the notification
    pub delivered: usize,

    /// Tokens deleted after a permanent delivery failure
    pub pruned: Vec<String>,

    /// Tokens that failed transiently and were kept
    pub transient: usize,
}

impl DispatchResult {
    /// Result for a user with no registered devices
    fn no_devices() -> Self {
        Self::default()
    }

    /// Result for a multicast the gateway could not carry out at all
    fn gateway_failed(attempted: usize) -> Self {
        Self {
            attempted,
            delivered: 0,
            pruned: Vec::new(),
            transient: attempted,
        }
    }

    /// Check whether nothing was sent (no devices registered)
    pub fn is_noop(&self) -> bool {
        self.attempted == 0
    }
}

/// Service that fans a budget alert out to a user's devices
pub struct NotificationDispatcher<'a> {
    gateway: &'a dyn PushGateway,
    devices: &'a DeviceTokenRepository,
    settings: &'a Settings,
}

impl<'a> NotificationDispatcher<'a> {
    /// Create a new dispatcher
    pub fn new(
        gateway: &'a dyn PushGateway,
        devices: &'a DeviceTokenRepository,
        settings: &'a Settings,
    ) -> Self {
        Self {
            gateway,
            devices,
            settings,
        }
    }

    /// Render the alert message for a status
    ///
    /// Two templates, selected by classification; the data payload carries
    /// the budget id so the client app can deep-link to it.
    fn render(&self, budget: &Budget, status: &BudgetStatus) -> PushMessage {
        let spent = self.settings.format_amount(status.spent);
        let limit = self.settings.format_amount(status.limit);

        let message = match status.classification {
            Classification::Exceeded => {
                let over = self.settings.format_amount(status.spent - status.limit);
                PushMessage::new(
                    "Budget exceeded",
                    format!(
                        "You've spent {}, {} over your {} limit of {}.",
                        spent, over, budget.period, limit
                    ),
                )
            }
            _ => {
                let remaining = self.settings.format_amount(status.remaining);
                PushMessage::new(
                    "Budget warning",
                    format!(
                        "You've spent {} of your {} {} budget. {} remaining.",
                        spent, limit, budget.period, remaining
                    ),
                )
            }
        };

        message
            .with_data("kind", "budget_alert")
            .with_data("budget_id", budget.id.as_uuid().to_string())
            .with_data("status", status.classification.to_string())
    }

    /// Send the alert for `status` to every device of `user_id`
    ///
    /// Permanent per-token failures are pruned from the registry; transient
    /// ones are reported and left for the next evaluation to re-attempt. A
    /// gateway transport failure is reported in the result without pruning.
    pub fn dispatch(
        &self,
        user_id: UserId,
        budget: &Budget,
        status: &BudgetStatus,
    ) -> SpendwatchResult<DispatchResult> {
        let devices = self.devices.list_by_user(user_id)?;
        if devices.is_empty() {
            debug!("no registered devices for user {}, skipping alert", user_id);
            return Ok(DispatchResult::no_devices());
        }

        let tokens: Vec<String> = devices.into_iter().map(|d| d.token).collect();
        let message = self.render(budget, status);

        let receipts = match self.gateway.send_multicast(&tokens, &message) {
            Ok(receipts) => receipts,
            Err(e) => {
                warn!(
                    "multicast for budget {} of user {} failed entirely: {}",
                    budget.id, user_id, e
                );
                return Ok(DispatchResult::gateway_failed(tokens.len()));
            }
        };

        let mut result = DispatchResult {
            attempted: tokens.len(),
            ..DispatchResult::default()
        };

        for receipt in receipts {
            match receipt.error {
                None => result.delivered += 1,
                Some(error) if error.is_permanent() => result.pruned.push(receipt.token),
                Some(error) => {
                    warn!(
                        "transient delivery failure for token {} of user {}: {}",
                        receipt.token, user_id, error
                    );
                    result.transient += 1;
                }
            }
        }

        if !result.pruned.is_empty() {
            self.devices.delete_many(&result.pruned)?;
            self.devices.save()?;
            info!(
                "pruned {} stale device token(s) for user {}",
                result.pruned.len(),
                user_id
            );
        }

        Ok(result)
    }
}
