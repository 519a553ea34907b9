//! Read-side store contracts consumed by the alerting pipeline
//!
//! Budget and transaction persistence belongs to the surrounding tracker;
//! the pipeline only needs these two queries. The JSON storage layer
//! implements them for the binary, tests substitute fakes.

use chrono::NaiveDateTime;

use crate::error::SpendwatchResult;
use crate::models::{Amount, Budget, CategoryId, UserId};

/// Budget lookup for an evaluation
pub trait BudgetStore {
    /// All budgets applicable to `(user_id, category_id)`: the user's
    /// budgets scoped to that category plus the user's global budgets.
    fn find_applicable(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> SpendwatchResult<Vec<Budget>>;
}

/// Spend aggregation over recorded transactions
pub trait TransactionStore {
    /// Sum of `expense` transaction amounts for `user_id` occurring at or
    /// after `since`, restricted to `category_id` when given. Zero matches
    /// sum to zero, not an error.
    fn sum_expenses(
        &self,
        user_id: UserId,
        category_id: Option<CategoryId>,
        since: NaiveDateTime,
    ) -> SpendwatchResult<Amount>;
}
