//! Relational backend over sea-orm.
//!
//! One table per entity. Referential integrity lives in the schema: the
//! tracker and expense foreign keys cascade on delete and `users.pin`
//! carries a unique index, so a racing duplicate registration is rejected by
//! the database itself. Multi-step operations run inside one transaction.
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    Expense, NewExpense, NewTracker, NewUser, ResultStore, Store, StoreError, Tracker, User,
    expenses, trackers, users,
};

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

/// Database-backed [`Store`].
#[derive(Debug, Clone)]
pub struct DbStore {
    database: DatabaseConnection,
}

impl DbStore {
    /// Wraps an already connected (and migrated) database.
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl Store for DbStore {
    async fn user_by_pin(&self, pin: &str) -> ResultStore<Option<User>> {
        users::Entity::find()
            .filter(users::Column::Pin.eq(pin))
            .one(&self.database)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn create_user(&self, new_user: NewUser) -> ResultStore<User> {
        let user = User::create(new_user);
        with_tx!(self, |db_tx| {
            let exists = users::Entity::find()
                .filter(users::Column::Pin.eq(user.pin.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(StoreError::Conflict(user.pin.clone()));
            }

            // The unique index backstops a concurrent duplicate insert.
            if let Err(err) = users::ActiveModel::from(&user).insert(&db_tx).await {
                return Err(match err.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => {
                        StoreError::Conflict(user.pin.clone())
                    }
                    _ => err.into(),
                });
            }
            Ok(user)
        })
    }

    async fn trackers_by_user(&self, user_id: Uuid) -> ResultStore<Vec<Tracker>> {
        trackers::Entity::find()
            .filter(trackers::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(trackers::Column::CreatedAt)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Tracker::try_from)
            .collect()
    }

    async fn tracker_by_id(&self, id: Uuid) -> ResultStore<Option<Tracker>> {
        trackers::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(Tracker::try_from)
            .transpose()
    }

    async fn create_tracker(
        &self,
        user_id: Uuid,
        new_tracker: NewTracker,
    ) -> ResultStore<Tracker> {
        let tracker = Tracker::create(user_id, new_tracker);
        match trackers::ActiveModel::from(&tracker)
            .insert(&self.database)
            .await
        {
            Ok(_) => Ok(tracker),
            Err(err) => Err(match err.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    StoreError::NotFound(user_id.to_string())
                }
                _ => err.into(),
            }),
        }
    }

    async fn delete_tracker(&self, id: Uuid) -> ResultStore<bool> {
        with_tx!(self, |db_tx| {
            // Explicit two-step removal in one transaction; the schema-level
            // cascade enforces the same invariant independently.
            expenses::Entity::delete_many()
                .filter(expenses::Column::TrackerId.eq(id.to_string()))
                .exec(&db_tx)
                .await?;
            let deleted = trackers::Entity::delete_by_id(id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(deleted.rows_affected > 0)
        })
    }

    async fn expenses_by_tracker(&self, tracker_id: Uuid) -> ResultStore<Vec<Expense>> {
        expenses::Entity::find()
            .filter(expenses::Column::TrackerId.eq(tracker_id.to_string()))
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::CreatedAt)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Expense::try_from)
            .collect()
    }

    async fn expense_by_id(&self, id: Uuid) -> ResultStore<Option<Expense>> {
        expenses::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(Expense::try_from)
            .transpose()
    }

    async fn create_expense(&self, new_expense: NewExpense) -> ResultStore<Expense> {
        let expense = Expense::create(new_expense);
        match expenses::ActiveModel::from(&expense)
            .insert(&self.database)
            .await
        {
            Ok(_) => Ok(expense),
            Err(err) => Err(match err.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    StoreError::NotFound(expense.tracker_id.to_string())
                }
                _ => err.into(),
            }),
        }
    }

    async fn delete_expense(&self, id: Uuid) -> ResultStore<bool> {
        let deleted = expenses::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        Ok(deleted.rows_affected > 0)
    }
}
