//! Budget repository for JSON storage
//!
//! Budgets are owned by the surrounding tracker's CRUD; the alerting core
//! only queries them. This repository provides both, and implements the
//! `BudgetStore` contract the evaluator consumes.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{SpendwatchError, SpendwatchResult};
use crate::models::{Budget, BudgetId, CategoryId, UserId};
use crate::stores::BudgetStore;

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), SpendwatchError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for budget in file_data.budgets {
            data.insert(budget.id, budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), SpendwatchError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let file_data = BudgetData { budgets };
        write_json_atomic(&self.path, &file_data)
    }

    /// Insert or replace a budget
    pub fn upsert(&self, budget: Budget) -> Result<(), SpendwatchError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(budget.id, budget);
        Ok(())
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, SpendwatchError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all budgets belonging to a user
    pub fn get_for_user(&self, user_id: UserId) -> Result<Vec<Budget>, SpendwatchError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budgets: Vec<_> = data
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        budgets.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(budgets)
    }

    /// Delete a budget by ID
    pub fn delete(&self, id: BudgetId) -> Result<bool, SpendwatchError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }
}

impl BudgetStore for BudgetRepository {
    fn find_applicable(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> SpendwatchResult<Vec<Budget>> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budgets: Vec<_> = data
            .values()
            .filter(|b| b.applies_to(user_id, category_id))
            .cloned()
            .collect();
        budgets.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(budgets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, RecurrencePeriod};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn budget(user: UserId, category: Option<CategoryId>, limit: i64) -> Budget {
        Budget::new(
            user,
            category,
            Amount::from_minor(limit),
            RecurrencePeriod::Monthly,
        )
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let b = budget(UserId::new(), None, 500_000);

        repo.upsert(b.clone()).unwrap();
        let loaded = repo.get(b.id).unwrap().unwrap();
        assert_eq!(loaded.limit, b.limit);
    }

    #[test]
    fn test_find_applicable_includes_global_and_scoped() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        let category = CategoryId::new();
        let other_category = CategoryId::new();

        repo.upsert(budget(user, Some(category), 100_000)).unwrap();
        repo.upsert(budget(user, None, 1_000_000)).unwrap();
        repo.upsert(budget(user, Some(other_category), 50_000))
            .unwrap();
        repo.upsert(budget(UserId::new(), Some(category), 999))
            .unwrap();

        let applicable = repo.find_applicable(user, category).unwrap();
        assert_eq!(applicable.len(), 2);
        assert!(applicable.iter().all(|b| b.user_id == user));
        assert!(applicable
            .iter()
            .any(|b| b.category_id == Some(category)));
        assert!(applicable.iter().any(|b| b.category_id.is_none()));
    }

    #[test]
    fn test_find_applicable_empty_when_no_budgets() {
        let (_temp_dir, repo) = create_test_repo();
        let applicable = repo
            .find_applicable(UserId::new(), CategoryId::new())
            .unwrap();
        assert!(applicable.is_empty());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let b = budget(UserId::new(), None, 500_000);

        repo.upsert(b.clone()).unwrap();
        assert!(repo.delete(b.id).unwrap());
        assert!(!repo.delete(b.id).unwrap());
        assert!(repo.get(b.id).unwrap().is_none());
    }

    #[test]
    fn test_persistence_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.json");
        let user = UserId::new();

        {
            let repo = BudgetRepository::new(path.clone());
            repo.load().unwrap();
            repo.upsert(budget(user, None, 750_000)).unwrap();
            repo.save().unwrap();
        }

        let repo = BudgetRepository::new(path);
        repo.load().unwrap();
        let budgets = repo.get_for_user(user).unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].limit.minor(), 750_000);
    }
}
