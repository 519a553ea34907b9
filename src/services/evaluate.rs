//! Budget evaluation pipeline
//!
//! Runs after every transaction write: selects the budgets applicable to
//! the written category, aggregates spend over each budget's own window and
//! scope, classifies, and dispatches alerts for anything past the warning
//! threshold. Each applicable budget is evaluated and notified
//! independently; a category-specific and a global budget crossing together
//! produce two separate alerts.

use log::{debug, error, info, warn};

use crate::clock::Clock;
use crate::error::SpendwatchResult;
use crate::models::{BudgetStatus, CategoryId, UserId};
use crate::services::NotificationDispatcher;
use crate::stores::{BudgetStore, TransactionStore};

/// Orchestrates the evaluate-and-alert pipeline
pub struct BudgetMonitor<'a> {
    budgets: &'a dyn BudgetStore,
    transactions: &'a dyn TransactionStore,
    dispatcher: NotificationDispatcher<'a>,
    clock: &'a dyn Clock,
}

impl<'a> BudgetMonitor<'a> {
    /// Create a new budget monitor
    pub fn new(
        budgets: &'a dyn BudgetStore,
        transactions: &'a dyn TransactionStore,
        dispatcher: NotificationDispatcher<'a>,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            budgets,
            transactions,
            dispatcher,
            clock,
        }
    }

    /// Evaluate every applicable budget for `(user_id, category_id)`
    ///
    /// Store failures propagate; dispatch failures are routed to the log so
    /// one budget's delivery trouble never blocks the rest. Statuses are
    /// computed fresh and returned for the caller to inspect or ignore.
    pub fn evaluate_budgets(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> SpendwatchResult<Vec<BudgetStatus>> {
        let applicable = self.budgets.find_applicable(user_id, category_id)?;
        if applicable.is_empty() {
            debug!("no applicable budgets for user {}", user_id);
            return Ok(Vec::new());
        }

        let now = self.clock.now();
        let mut statuses = Vec::with_capacity(applicable.len());

        for budget in &applicable {
            // Each budget aggregates over its own scope: a global budget
            // sums all categories, not just the one that triggered us
            let since = budget.period.window_start_at(now);
            let spent = self
                .transactions
                .sum_expenses(user_id, budget.category_id, since)?;

            let status = BudgetStatus::evaluate(budget, spent);

            if status.needs_alert() {
                match self.dispatcher.dispatch(user_id, budget, &status) {
                    Ok(result) if result.is_noop() => {}
                    Ok(result) => info!(
                        "budget {} {}: delivered {}/{}, pruned {}, transient {}",
                        budget.id,
                        status.classification,
                        result.delivered,
                        result.attempted,
                        result.pruned.len(),
                        result.transient
                    ),
                    Err(e) => warn!(
                        "failed to dispatch alert for budget {} of user {}: {}",
                        budget.id, user_id, e
                    ),
                }
            }

            statuses.push(status);
        }

        Ok(statuses)
    }

    /// Trigger hook: a transaction for `(user_id, category_id)` was written
    ///
    /// Fire-and-forget: every failure goes to the log, never back to the
    /// transaction-write path, which has already committed.
    pub fn on_transaction_written(&self, user_id: UserId, category_id: CategoryId) {
        if let Err(e) = self.evaluate_budgets(user_id, category_id) {
            error!("budget evaluation failed for user {}: {}", user_id, e);
        }
    }
}
