//! Device token registry
//!
//! Keyed by token value (globally unique) with a by-user index so dispatch
//! can collect all of a user's delivery addresses in one lookup. Upserting a
//! known token reassigns it to the new owner; deletes are idempotent.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendwatchError;
use crate::models::{DeviceToken, Platform, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable device token data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct DeviceTokenData {
    devices: Vec<DeviceToken>,
}

/// Repository for device token persistence
pub struct DeviceTokenRepository {
    path: PathBuf,
    /// token value -> registration
    data: RwLock<HashMap<String, DeviceToken>>,
    /// Index: user_id -> token values
    by_user: RwLock<HashMap<UserId, Vec<String>>>,
}

impl DeviceTokenRepository {
    /// Create a new device token repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Load registrations from disk and build the by-user index
    pub fn load(&self) -> Result<(), SpendwatchError> {
        let file_data: DeviceTokenData = read_json(&self.path)?;

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

        for device in file_data.devices {
            by_user
                .entry(device.user_id)
                .or_default()
                .push(device.token.clone());
            data.insert(device.token.clone(), device);
        }

        Ok(())
    }

    /// Save registrations to disk
    pub fn save(&self) -> Result<(), SpendwatchError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut devices: Vec<_> = data.values().cloned().collect();
        devices.sort_by(|a, b| a.token.cmp(&b.token));

        let file_data = DeviceTokenData { devices };
        write_json_atomic(&self.path, &file_data)
    }

    /// Register a token, reassigning ownership if the token already exists
    ///
    /// A token value maps to at most one user; when a device is handed to a
    /// different account the old owner silently loses the registration.
    pub fn upsert(
        &self,
        token: impl Into<String>,
        user_id: UserId,
        platform: Platform,
    ) -> Result<DeviceToken, SpendwatchError> {
        let token = token.into();

        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        // Drop the old owner's index entry on reassignment
        if let Some(existing) = data.get(&token) {
            if existing.user_id != user_id {
                if let Some(tokens) = by_user.get_mut(&existing.user_id) {
                    tokens.retain(|t| t != &token);
                }
            }
        }

        let device = DeviceToken::new(token.clone(), user_id, platform);

        let user_tokens = by_user.entry(user_id).or_default();
        if !user_tokens.contains(&token) {
            user_tokens.push(token.clone());
        }
        data.insert(token, device.clone());

        Ok(device)
    }

    /// Get a registration by token value
    pub fn get(&self, token: &str) -> Result<Option<DeviceToken>, SpendwatchError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(token).cloned())
    }

    /// Get all registrations for a user
    pub fn list_by_user(&self, user_id: UserId) -> Result<Vec<DeviceToken>, SpendwatchError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_user = self
            .by_user
            .read()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let tokens = by_user.get(&user_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut devices: Vec<_> = tokens
            .iter()
            .filter_map(|t| data.get(t).cloned())
            .collect();
        devices.sort_by(|a, b| a.token.cmp(&b.token));
        Ok(devices)
    }

    /// Delete one registration; absent tokens are not an error
    pub fn delete_by_token(&self, token: &str) -> Result<(), SpendwatchError> {
        self.delete_many(&[token.to_string()])
    }

    /// Delete a batch of registrations; absent tokens are skipped
    pub fn delete_many(&self, tokens: &[String]) -> Result<(), SpendwatchError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| SpendwatchError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        for token in tokens {
            if let Some(device) = data.remove(token) {
                if let Some(user_tokens) = by_user.get_mut(&device.user_id) {
                    user_tokens.retain(|t| t != token);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, DeviceTokenRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = DeviceTokenRepository::new(temp_dir.path().join("devices.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_upsert_and_list() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();

        repo.upsert("tok-a", user, Platform::Android).unwrap();
        repo.upsert("tok-b", user, Platform::Ios).unwrap();

        let devices = repo.list_by_user(user).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].token, "tok-a");
        assert_eq!(devices[1].token, "tok-b");

        let by_token = repo.get("tok-a").unwrap().unwrap();
        assert_eq!(by_token.user_id, user);
        assert!(repo.get("tok-missing").unwrap().is_none());
    }

    #[test]
    fn test_upsert_reassigns_ownership() {
        let (_temp_dir, repo) = create_test_repo();
        let first = UserId::new();
        let second = UserId::new();

        repo.upsert("tok-shared", first, Platform::Android).unwrap();
        repo.upsert("tok-shared", second, Platform::Android).unwrap();

        // Exactly one row, owned by the second user
        assert!(repo.list_by_user(first).unwrap().is_empty());
        let devices = repo.list_by_user(second).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].user_id, second);
    }

    #[test]
    fn test_upsert_same_user_is_idempotent() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();

        repo.upsert("tok-a", user, Platform::Android).unwrap();
        repo.upsert("tok-a", user, Platform::Web).unwrap();

        let devices = repo.list_by_user(user).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].platform, Platform::Web);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();

        repo.upsert("tok-a", user, Platform::Android).unwrap();
        repo.delete_by_token("tok-a").unwrap();
        repo.delete_by_token("tok-a").unwrap();
        repo.delete_by_token("never-existed").unwrap();

        assert!(repo.list_by_user(user).unwrap().is_empty());
    }

    #[test]
    fn test_delete_many_prunes_batch() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();

        repo.upsert("tok-a", user, Platform::Android).unwrap();
        repo.upsert("tok-b", user, Platform::Ios).unwrap();
        repo.upsert("tok-c", user, Platform::Web).unwrap();

        repo.delete_many(&["tok-b".to_string(), "tok-missing".to_string()])
            .unwrap();

        let devices = repo.list_by_user(user).unwrap();
        let tokens: Vec<_> = devices.iter().map(|d| d.token.as_str()).collect();
        assert_eq!(tokens, vec!["tok-a", "tok-c"]);
    }

    #[test]
    fn test_persistence_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("devices.json");
        let user = UserId::new();

        {
            let repo = DeviceTokenRepository::new(path.clone());
            repo.load().unwrap();
            repo.upsert("tok-a", user, Platform::Ios).unwrap();
            repo.save().unwrap();
        }

        let repo = DeviceTokenRepository::new(path);
        repo.load().unwrap();
        let devices = repo.list_by_user(user).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].token, "tok-a");
    }
}
