//! Budget model and threshold classification
//!
//! A budget is a spending limit over a recurrence period, optionally scoped
//! to one category. A budget with no category is "global" and applies to the
//! user's total spend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId, UserId};
use super::money::Amount;
use super::period::RecurrencePeriod;

/// A user-defined spending limit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// The user this budget belongs to
    pub user_id: UserId,

    /// Scope: a single category, or None for a global limit on total spend
    pub category_id: Option<CategoryId>,

    /// The spending limit for one period
    pub limit: Amount,

    /// How often the window resets
    #[serde(default)]
    pub period: RecurrencePeriod,

    /// When this budget was created
    pub created_at: DateTime<Utc>,

    /// When this budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget
    pub fn new(
        user_id: UserId,
        category_id: Option<CategoryId>,
        limit: Amount,
        period: RecurrencePeriod,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            user_id,
            category_id,
            limit,
            period,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this budget is a global (all-categories) limit
    pub fn is_global(&self) -> bool {
        self.category_id.is_none()
    }

    /// Check whether this budget applies to an evaluation for
    /// `(user_id, category_id)`
    ///
    /// A budget applies if it belongs to the user and either matches the
    /// category or is global. A category-specific and a global budget can
    /// both apply to the same evaluation; each is handled independently.
    pub fn applies_to(&self, user_id: UserId, category_id: CategoryId) -> bool {
        self.user_id == user_id
            && (self.category_id.is_none() || self.category_id == Some(category_id))
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit);
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category_id {
            Some(cat) => write!(f, "{} limit {} for {}", self.period, self.limit, cat),
            None => write!(f, "{} limit {} (all categories)", self.period, self.limit),
        }
    }
}

/// How a spend aggregate compares to a budget's limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Spend is at or below 80% of the limit
    Ok,
    /// Spend is above 80% of the limit but within it
    Warning,
    /// Spend is above the limit
    Exceeded,
}

impl Classification {
    /// Classify a spend aggregate against a limit
    ///
    /// The 80% boundary itself is still `Ok`; the limit itself is still
    /// `Warning`. Comparisons widen to i128 so `spent * 5` cannot overflow.
    pub fn classify(limit: Amount, spent: Amount) -> Self {
        if spent > limit {
            Self::Exceeded
        } else if (spent.minor() as i128) * 5 > (limit.minor() as i128) * 4 {
            Self::Warning
        } else {
            Self::Ok
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Warning => write!(f, "warning"),
            Self::Exceeded => write!(f, "exceeded"),
        }
    }
}

/// The outcome of evaluating one budget against the current window's spend
///
/// Computed fresh on every evaluation; never persisted.
#[derive(Debug, Clone)]
pub struct BudgetStatus {
    /// The budget this status was computed for
    pub budget_id: BudgetId,

    /// The budget's limit
    pub limit: Amount,

    /// Spend aggregate for this budget's own window and scope
    pub spent: Amount,

    /// limit - spent (negative when exceeded)
    pub remaining: Amount,

    /// Threshold classification
    pub classification: Classification,
}

impl BudgetStatus {
    /// Evaluate a budget against a spend aggregate
    pub fn evaluate(budget: &Budget, spent: Amount) -> Self {
        Self {
            budget_id: budget.id,
            limit: budget.limit,
            spent,
            remaining: budget.limit - spent,
            classification: Classification::classify(budget.limit, spent),
        }
    }

    /// Check whether this status warrants a notification
    pub fn needs_alert(&self) -> bool {
        self.classification != Classification::Ok
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: spent {} of {} (remaining {})",
            self.classification, self.spent, self.limit, self.remaining
        )
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveLimit,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLimit => write!(f, "Budget limit must be positive"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_budget(limit: i64) -> Budget {
        Budget::new(
            UserId::new(),
            None,
            Amount::from_minor(limit),
            RecurrencePeriod::Monthly,
        )
    }

    #[test]
    fn test_classify_ok() {
        let limit = Amount::from_minor(1_000_000);
        assert_eq!(
            Classification::classify(limit, Amount::from_minor(500_000)),
            Classification::Ok
        );
        assert_eq!(
            Classification::classify(limit, Amount::zero()),
            Classification::Ok
        );
        // The 80% boundary is still ok
        assert_eq!(
            Classification::classify(limit, Amount::from_minor(800_000)),
            Classification::Ok
        );
    }

    #[test]
    fn test_classify_warning() {
        let limit = Amount::from_minor(1_000_000);
        assert_eq!(
            Classification::classify(limit, Amount::from_minor(850_000)),
            Classification::Warning
        );
        assert_eq!(
            Classification::classify(limit, Amount::from_minor(800_001)),
            Classification::Warning
        );
        // Exactly at the limit is a warning, not an overrun
        assert_eq!(
            Classification::classify(limit, Amount::from_minor(1_000_000)),
            Classification::Warning
        );
    }

    #[test]
    fn test_classify_exceeded() {
        let limit = Amount::from_minor(1_000_000);
        assert_eq!(
            Classification::classify(limit, Amount::from_minor(1_000_001)),
            Classification::Exceeded
        );
        assert_eq!(
            Classification::classify(limit, Amount::from_minor(1_200_000)),
            Classification::Exceeded
        );
    }

    #[test]
    fn test_classify_no_overflow_near_i64_max() {
        // 5 * spent would overflow i64; the widened comparison must not
        let limit = Amount::from_minor(i64::MAX);
        assert_eq!(
            Classification::classify(limit, Amount::from_minor(i64::MAX - 1)),
            Classification::Warning
        );
    }

    #[test]
    fn test_status_warning_example() {
        let budget = test_budget(1_000_000);
        let status = BudgetStatus::evaluate(&budget, Amount::from_minor(850_000));

        assert_eq!(status.classification, Classification::Warning);
        assert_eq!(status.remaining.minor(), 150_000);
        assert!(status.needs_alert());
    }

    #[test]
    fn test_status_exceeded_example() {
        let budget = test_budget(1_000_000);
        let status = BudgetStatus::evaluate(&budget, Amount::from_minor(1_200_000));

        assert_eq!(status.classification, Classification::Exceeded);
        assert_eq!(status.remaining.minor(), -200_000);
        assert!(status.needs_alert());
    }

    #[test]
    fn test_status_ok_example() {
        let budget = test_budget(1_000_000);
        let status = BudgetStatus::evaluate(&budget, Amount::from_minor(500_000));

        assert_eq!(status.classification, Classification::Ok);
        assert_eq!(status.remaining.minor(), 500_000);
        assert!(!status.needs_alert());
    }

    #[test]
    fn test_applies_to() {
        let user = UserId::new();
        let other_user = UserId::new();
        let category = CategoryId::new();
        let other_category = CategoryId::new();

        let scoped = Budget::new(
            user,
            Some(category),
            Amount::from_minor(100),
            RecurrencePeriod::Monthly,
        );
        let global = Budget::new(
            user,
            None,
            Amount::from_minor(100),
            RecurrencePeriod::Monthly,
        );

        assert!(scoped.applies_to(user, category));
        assert!(!scoped.applies_to(user, other_category));
        assert!(global.applies_to(user, category));
        assert!(global.applies_to(user, other_category));

        // Other users' budgets never apply
        assert!(!scoped.applies_to(other_user, category));
        assert!(!global.applies_to(other_user, category));
    }

    #[test]
    fn test_validation() {
        let mut budget = test_budget(50_000);
        assert!(budget.validate().is_ok());

        budget.limit = Amount::zero();
        assert_eq!(
            budget.validate(),
            Err(BudgetValidationError::NonPositiveLimit)
        );

        budget.limit = Amount::from_minor(-100);
        assert_eq!(
            budget.validate(),
            Err(BudgetValidationError::NonPositiveLimit)
        );
    }

    #[test]
    fn test_serialization() {
        let budget = test_budget(75_000);
        let json = serde_json::to_string(&budget).unwrap();
        let deserialized: Budget = serde_json::from_str(&json).unwrap();
        assert_eq!(budget.id, deserialized.id);
        assert_eq!(budget.limit, deserialized.limit);
        assert_eq!(budget.period, deserialized.period);
    }
}
