//! The module contains the representation of a user.
//!
//! A user is identified by a 4-digit PIN: a bearer identity token, not a
//! cryptographic secret. PINs are globally unique across all users.
use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, StoreError, input::NewUser};

/// A registered user.
///
/// Created once at registration, never updated and never deleted by the
/// storage layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub pin: String,
    pub preferred_currency: Currency,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Materializes a validated registration with a fresh id.
    pub(crate) fn create(new_user: NewUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            pin: new_user.pin,
            preferred_currency: new_user.preferred_currency,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub pin: String,
    pub preferred_currency: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::trackers::Entity")]
    Trackers,
}

impl Related<super::trackers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trackers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            id: ActiveValue::Set(user.id.to_string()),
            pin: ActiveValue::Set(user.pin.clone()),
            preferred_currency: ActiveValue::Set(user.preferred_currency.code().to_string()),
            created_at: ActiveValue::Set(user.created_at),
        }
    }
}

impl TryFrom<Model> for User {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| StoreError::Corrupt(format!("user id {}", model.id)))?;
        let preferred_currency = Currency::try_from(model.preferred_currency.as_str())
            .map_err(|_| StoreError::Corrupt(format!("user {id} currency")))?;
        Ok(User {
            id,
            pin: model.pin,
            preferred_currency,
            created_at: model.created_at,
        })
    }
}
