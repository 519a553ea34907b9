//! Transaction repository for JSON storage
//!
//! Holds recorded transactions with a by-user index and implements the
//! read-side spend aggregate the evaluator consumes. The aggregate runs
//! against the in-memory cache in one pass; it never locks across the
//! transaction write that triggered it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDateTime;

use crate::error::{SpendwatchError, SpendwatchResult};
use crate::models::{Amount, CategoryId, Transaction, TransactionId, UserId};
use crate::stores::TransactionStore;

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with indexing
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: user_id -> transaction_ids
    by_user: RwLock<HashMap<UserId, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the by-user index
    pub fn load(&self) -> Result<(), SpendwatchError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_user.clear();

        for txn in file_data.transactions {
            by_user.entry(txn.user_id).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), SpendwatchError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| {
            b.occurred_at
                .cmp(&a.occurred_at)
                .then(b.created_at.cmp(&a.created_at))
        });

        let file_data = TransactionData { transactions };
        write_json_atomic(&self.path, &file_data)
    }

    /// Insert or replace a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), SpendwatchError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let user_txns = by_user.entry(txn.user_id).or_default();
        if !user_txns.contains(&txn.id) {
            user_txns.push(txn.id);
        }
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Get all transactions for a user, newest first
    pub fn get_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, SpendwatchError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_user = self
            .by_user
            .read()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_user.get(&user_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        Ok(transactions)
    }
}

impl TransactionStore for TransactionRepository {
    fn sum_expenses(
        &self,
        user_id: UserId,
        category_id: Option<CategoryId>,
        since: NaiveDateTime,
    ) -> SpendwatchResult<Amount> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_user = self
            .by_user
            .read()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_user.get(&user_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let total: Amount = ids
            .iter()
            .filter_map(|id| data.get(id))
            .filter(|t| t.is_expense())
            .filter(|t| t.occurred_at >= since)
            .filter(|t| category_id.is_none() || Some(t.category_id) == category_id)
            .map(|t| t.amount)
            .sum();

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn expense(user: UserId, category: CategoryId, amount: i64, when: NaiveDateTime) -> Transaction {
        Transaction::new(
            user,
            category,
            TransactionKind::Expense,
            Amount::from_minor(amount),
            when,
        )
    }

    #[test]
    fn test_sum_expenses_in_window() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        let category = CategoryId::new();

        repo.upsert(expense(user, category, 300_000, at(2025, 1, 10)))
            .unwrap();
        repo.upsert(expense(user, category, 550_000, at(2025, 1, 20)))
            .unwrap();
        // Before the window; must not count
        repo.upsert(expense(user, category, 900_000, at(2024, 12, 28)))
            .unwrap();

        let total = repo
            .sum_expenses(user, Some(category), at(2025, 1, 1))
            .unwrap();
        assert_eq!(total.minor(), 850_000);
    }

    #[test]
    fn test_sum_expenses_ignores_income() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        let category = CategoryId::new();

        repo.upsert(expense(user, category, 100_000, at(2025, 1, 10)))
            .unwrap();
        repo.upsert(Transaction::new(
            user,
            category,
            TransactionKind::Income,
            Amount::from_minor(5_000_000),
            at(2025, 1, 10),
        ))
        .unwrap();

        let total = repo.sum_expenses(user, None, at(2025, 1, 1)).unwrap();
        assert_eq!(total.minor(), 100_000);
    }

    #[test]
    fn test_sum_expenses_unrestricted_spans_categories() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();

        repo.upsert(expense(user, CategoryId::new(), 200_000, at(2025, 1, 5)))
            .unwrap();
        repo.upsert(expense(user, CategoryId::new(), 300_000, at(2025, 1, 6)))
            .unwrap();

        let total = repo.sum_expenses(user, None, at(2025, 1, 1)).unwrap();
        assert_eq!(total.minor(), 500_000);
    }

    #[test]
    fn test_sum_expenses_scoped_to_one_user() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        let category = CategoryId::new();

        repo.upsert(expense(user, category, 100_000, at(2025, 1, 5)))
            .unwrap();
        repo.upsert(expense(UserId::new(), category, 999_999, at(2025, 1, 5)))
            .unwrap();

        let total = repo
            .sum_expenses(user, Some(category), at(2025, 1, 1))
            .unwrap();
        assert_eq!(total.minor(), 100_000);
    }

    #[test]
    fn test_sum_expenses_zero_matches_is_zero() {
        let (_temp_dir, repo) = create_test_repo();

        let total = repo
            .sum_expenses(UserId::new(), None, at(2025, 1, 1))
            .unwrap();
        assert!(total.is_zero());
    }

    #[test]
    fn test_window_start_is_inclusive() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        let category = CategoryId::new();
        let start = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        repo.upsert(Transaction::new(
            user,
            category,
            TransactionKind::Expense,
            Amount::from_minor(70_000),
            start,
        ))
        .unwrap();

        let total = repo.sum_expenses(user, Some(category), start).unwrap();
        assert_eq!(total.minor(), 70_000);
    }

    #[test]
    fn test_persistence_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let user = UserId::new();
        let category = CategoryId::new();

        {
            let repo = TransactionRepository::new(path.clone());
            repo.load().unwrap();
            repo.upsert(expense(user, category, 42_000, at(2025, 2, 2)))
                .unwrap();
            repo.save().unwrap();
        }

        let repo = TransactionRepository::new(path);
        repo.load().unwrap();
        let txns = repo.get_by_user(user).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount.minor(), 42_000);
    }
}
