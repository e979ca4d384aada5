//! The module contains the representation of an expense.
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Amount, StoreError, input::NewExpense};

/// A dated, categorized expense record inside a tracker.
///
/// `date` is the calendar day the money was spent; `created_at` is when the
/// record was written. Listings order by `date` first and break ties with
/// `created_at`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub tracker_id: Uuid,
    pub amount: Amount,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Materializes a validated expense with a fresh id.
    pub(crate) fn create(new_expense: NewExpense) -> Self {
        Self {
            id: Uuid::new_v4(),
            tracker_id: new_expense.tracker_id,
            amount: new_expense.amount,
            category: new_expense.category,
            description: new_expense.description,
            date: new_expense.date,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub tracker_id: String,
    pub amount_cents: i64,
    pub category: String,
    pub description: String,
    pub date: Date,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trackers::Entity",
        from = "Column::TrackerId",
        to = "super::trackers::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Trackers,
}

impl Related<super::trackers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trackers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            tracker_id: ActiveValue::Set(expense.tracker_id.to_string()),
            amount_cents: ActiveValue::Set(expense.amount.cents()),
            category: ActiveValue::Set(expense.category.clone()),
            description: ActiveValue::Set(expense.description.clone()),
            date: ActiveValue::Set(expense.date),
            created_at: ActiveValue::Set(expense.created_at),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| StoreError::Corrupt(format!("expense id {}", model.id)))?;
        let tracker_id = Uuid::parse_str(&model.tracker_id)
            .map_err(|_| StoreError::Corrupt(format!("expense {id} tracker id")))?;
        Ok(Expense {
            id,
            tracker_id,
            amount: Amount::new(model.amount_cents),
            category: model.category,
            description: model.description,
            date: model.date,
            created_at: model.created_at,
        })
    }
}
