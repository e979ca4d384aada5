//! The module contains the representation of a tracker.
//!
//! A tracker is a named, currency-scoped container of expenses owned by one
//! user (a "budget"). Deleting a tracker also deletes every expense it owns.
use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, StoreError, input::NewTracker};

/// A budget owned by one user.
///
/// Never updated in place; deletion cascades to its expenses as one logical
/// unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tracker {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

impl Tracker {
    /// Materializes a validated tracker under `user_id` with a fresh id.
    pub(crate) fn create(user_id: Uuid, new_tracker: NewTracker) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: new_tracker.name,
            currency: new_tracker.currency,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trackers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub currency: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Tracker> for ActiveModel {
    fn from(tracker: &Tracker) -> Self {
        Self {
            id: ActiveValue::Set(tracker.id.to_string()),
            user_id: ActiveValue::Set(tracker.user_id.to_string()),
            name: ActiveValue::Set(tracker.name.clone()),
            currency: ActiveValue::Set(tracker.currency.code().to_string()),
            created_at: ActiveValue::Set(tracker.created_at),
        }
    }
}

impl TryFrom<Model> for Tracker {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| StoreError::Corrupt(format!("tracker id {}", model.id)))?;
        let user_id = Uuid::parse_str(&model.user_id)
            .map_err(|_| StoreError::Corrupt(format!("tracker {id} user id")))?;
        let currency = Currency::try_from(model.currency.as_str())
            .map_err(|_| StoreError::Corrupt(format!("tracker {id} currency")))?;
        Ok(Tracker {
            id,
            user_id,
            name: model.name,
            currency,
            created_at: model.created_at,
        })
    }
}
