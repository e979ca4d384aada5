//! Persistence and aggregation core for pintrack.
//!
//! Three entities ([`User`], [`Tracker`], [`Expense`]) live behind one
//! storage contract, [`Store`], with two interchangeable backends:
//!
//! - [`FileStore`]: the whole dataset in one JSON document, rewritten after
//!   every mutation.
//! - [`DbStore`]: one table per entity over sea-orm, with foreign keys and a
//!   unique PIN index enforced by the schema.
//!
//! Both backends satisfy the same contract and run the same test suite.
//! Aggregation ([`category_totals`]) is a pure function over an expense list
//! and does not touch storage.
use async_trait::async_trait;
use uuid::Uuid;

pub use currency::Currency;
pub use db::DbStore;
pub use error::StoreError;
pub use expenses::Expense;
pub use file::FileStore;
pub use input::{NewExpense, NewTracker, NewUser};
pub use money::Amount;
pub use summary::{CategoryTotal, Summary, category_totals};
pub use trackers::Tracker;
pub use users::User;

mod currency;
mod db;
mod error;
mod expenses;
mod file;
mod input;
mod money;
mod summary;
mod trackers;
mod users;

pub type ResultStore<T> = Result<T, StoreError>;

/// The capability set every storage backend provides.
///
/// Lookups signal absence with `None`, deletions with `false`; neither is an
/// error. Creation takes validated `New*` inputs so malformed data never
/// reaches a backend. Each operation completes its flush or commit before
/// returning.
#[async_trait]
pub trait Store: Send + Sync {
    /// Looks a user up by PIN.
    async fn user_by_pin(&self, pin: &str) -> ResultStore<Option<User>>;

    /// Registers a user under a fresh id.
    ///
    /// Fails with [`StoreError::Conflict`] when the PIN is already in use.
    async fn create_user(&self, new_user: NewUser) -> ResultStore<User>;

    /// Lists a user's trackers, newest `created_at` first.
    async fn trackers_by_user(&self, user_id: Uuid) -> ResultStore<Vec<Tracker>>;

    async fn tracker_by_id(&self, id: Uuid) -> ResultStore<Option<Tracker>>;

    /// Creates a tracker under `user_id`.
    ///
    /// The user's existence is not re-verified here; the caller has resolved
    /// it, and the relational backend additionally translates a foreign-key
    /// rejection into [`StoreError::NotFound`].
    async fn create_tracker(&self, user_id: Uuid, new_tracker: NewTracker)
    -> ResultStore<Tracker>;

    /// Deletes a tracker and every expense it owns as one logical unit.
    ///
    /// Returns `true` if the tracker existed.
    async fn delete_tracker(&self, id: Uuid) -> ResultStore<bool>;

    /// Lists a tracker's expenses, `date` descending with `created_at`
    /// descending as tiebreak.
    async fn expenses_by_tracker(&self, tracker_id: Uuid) -> ResultStore<Vec<Expense>>;

    async fn expense_by_id(&self, id: Uuid) -> ResultStore<Option<Expense>>;

    async fn create_expense(&self, new_expense: NewExpense) -> ResultStore<Expense>;

    /// Deletes a single expense, no cascade. Returns `true` if it existed.
    async fn delete_expense(&self, id: Uuid) -> ResultStore<bool>;
}
