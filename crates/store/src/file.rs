//! JSON-file backend.
//!
//! The whole three-collection dataset is read into memory at startup, owned
//! by a single mutex, and re-serialized in full after every mutating
//! operation (write-through). The flush writes a sibling temp file and
//! renames it over the target, so a crash mid-write never corrupts the
//! previously persisted state; at most the latest operation is lost. A failed
//! flush rolls the in-memory change back, so reads never observe a mutation
//! that was reported as an error.
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    Expense, NewExpense, NewTracker, NewUser, ResultStore, Store, StoreError, Tracker, User,
};

/// The persisted document: three named collections of entity records.
#[derive(Debug, Default, Serialize, Deserialize)]
struct DataFile {
    users: Vec<User>,
    trackers: Vec<Tracker>,
    expenses: Vec<Expense>,
}

/// File-backed [`Store`].
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: Mutex<DataFile>,
}

impl FileStore {
    /// Opens the store at `path`, starting empty when no file exists yet.
    pub fn open(path: impl AsRef<Path>) -> ResultStore<Self> {
        let path = path.as_ref().to_path_buf();
        let data = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == ErrorKind::NotFound => DataFile::default(),
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(
            path = %path.display(),
            users = data.users.len(),
            trackers = data.trackers.len(),
            expenses = data.expenses.len(),
            "opened file store"
        );
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Rewrites the complete dataset. Called with the mutex held, so the
    /// serialized image is always internally consistent.
    fn flush(&self, data: &DataFile) -> ResultStore<()> {
        let raw = serde_json::to_vec_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl Store for FileStore {
    async fn user_by_pin(&self, pin: &str) -> ResultStore<Option<User>> {
        let data = self.data.lock().await;
        Ok(data.users.iter().find(|u| u.pin == pin).cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> ResultStore<User> {
        let mut data = self.data.lock().await;
        // Check-then-insert is atomic here: both happen under the same lock.
        if data.users.iter().any(|u| u.pin == new_user.pin) {
            return Err(StoreError::Conflict(new_user.pin));
        }
        let user = User::create(new_user);
        data.users.push(user.clone());
        if let Err(err) = self.flush(&data) {
            data.users.pop();
            return Err(err);
        }
        Ok(user)
    }

    async fn trackers_by_user(&self, user_id: Uuid) -> ResultStore<Vec<Tracker>> {
        let data = self.data.lock().await;
        let mut trackers: Vec<Tracker> = data
            .trackers
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        trackers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trackers)
    }

    async fn tracker_by_id(&self, id: Uuid) -> ResultStore<Option<Tracker>> {
        let data = self.data.lock().await;
        Ok(data.trackers.iter().find(|t| t.id == id).cloned())
    }

    async fn create_tracker(
        &self,
        user_id: Uuid,
        new_tracker: NewTracker,
    ) -> ResultStore<Tracker> {
        let mut data = self.data.lock().await;
        let tracker = Tracker::create(user_id, new_tracker);
        data.trackers.push(tracker.clone());
        if let Err(err) = self.flush(&data) {
            data.trackers.pop();
            return Err(err);
        }
        Ok(tracker)
    }

    async fn delete_tracker(&self, id: Uuid) -> ResultStore<bool> {
        let mut data = self.data.lock().await;
        let Some(index) = data.trackers.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        let tracker = data.trackers.remove(index);
        let (doomed, kept): (Vec<Expense>, Vec<Expense>) = std::mem::take(&mut data.expenses)
            .into_iter()
            .partition(|e| e.tracker_id == id);
        data.expenses = kept;
        // One flush covers both removals, so the cascade is all-or-nothing.
        if let Err(err) = self.flush(&data) {
            data.trackers.insert(index, tracker);
            data.expenses.extend(doomed);
            return Err(err);
        }
        Ok(true)
    }

    async fn expenses_by_tracker(&self, tracker_id: Uuid) -> ResultStore<Vec<Expense>> {
        let data = self.data.lock().await;
        let mut expenses: Vec<Expense> = data
            .expenses
            .iter()
            .filter(|e| e.tracker_id == tracker_id)
            .cloned()
            .collect();
        expenses.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(expenses)
    }

    async fn expense_by_id(&self, id: Uuid) -> ResultStore<Option<Expense>> {
        let data = self.data.lock().await;
        Ok(data.expenses.iter().find(|e| e.id == id).cloned())
    }

    async fn create_expense(&self, new_expense: NewExpense) -> ResultStore<Expense> {
        let mut data = self.data.lock().await;
        let expense = Expense::create(new_expense);
        data.expenses.push(expense.clone());
        if let Err(err) = self.flush(&data) {
            data.expenses.pop();
            return Err(err);
        }
        Ok(expense)
    }

    async fn delete_expense(&self, id: Uuid) -> ResultStore<bool> {
        let mut data = self.data.lock().await;
        let Some(index) = data.expenses.iter().position(|e| e.id == id) else {
            return Ok(false);
        };
        let expense = data.expenses.remove(index);
        if let Err(err) = self.flush(&data) {
            data.expenses.insert(index, expense);
            return Err(err);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let root =
            std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_data");
        std::fs::create_dir_all(&root).unwrap();
        root.join(format!("{name}_{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn reopen_sees_persisted_data() {
        let path = scratch_path("reopen");

        let store = FileStore::open(&path).unwrap();
        let user = store
            .create_user(NewUser::new("1234", None).unwrap())
            .await
            .unwrap();
        let tracker = store
            .create_tracker(
                user.id,
                NewTracker::new("Groceries", crate::Currency::Usd).unwrap(),
            )
            .await
            .unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        let found = reopened.user_by_pin("1234").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        let trackers = reopened.trackers_by_user(user.id).await.unwrap();
        assert_eq!(trackers, vec![tracker]);

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn document_has_three_named_collections() {
        let path = scratch_path("layout");

        let store = FileStore::open(&path).unwrap();
        store
            .create_user(NewUser::new("4321", None).unwrap())
            .await
            .unwrap();
        drop(store);

        let raw = std::fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(doc["users"].is_array());
        assert!(doc["trackers"].is_array());
        assert!(doc["expenses"].is_array());
        assert_eq!(doc["users"][0]["pin"], "4321");
        assert_eq!(doc["users"][0]["preferredCurrency"], "USD");

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn failed_flush_rolls_back_the_in_memory_mutation() {
        // A path inside a directory that does not exist opens as an empty
        // store but cannot be written.
        let root =
            std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_data");
        let path = root
            .join(format!("missing_{}", Uuid::new_v4()))
            .join("data.json");

        let store = FileStore::open(&path).unwrap();
        let err = store
            .create_user(NewUser::new("1234", None).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Io(_)), "got {err:?}");

        // The rejected user must not be visible afterwards.
        assert!(store.user_by_pin("1234").await.unwrap().is_none());
    }
}
