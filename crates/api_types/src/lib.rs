//! Wire shapes shared by the server and its clients.
//!
//! Field names are camelCase on the wire; amounts travel as two-decimal JSON
//! numbers and dates as `YYYY-MM-DD` strings.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Inr,
}

pub mod user {
    use super::*;

    /// Request body for `POST /api/auth/register`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Register {
        pub pin: String,
        pub preferred_currency: Option<Currency>,
    }

    /// Request body for `POST /api/auth/login`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub pin: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserView {
        pub id: String,
        pub pin: String,
        pub preferred_currency: Currency,
        pub created_at: DateTime<Utc>,
    }

    /// Auth responses wrap the user, matching the `{ "user": ... }` shape
    /// clients expect.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserResponse {
        pub user: UserView,
    }
}

pub mod tracker {
    use super::*;

    /// Request body for `POST /api/trackers`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TrackerNew {
        pub user_id: String,
        pub name: String,
        pub currency: Currency,
    }

    /// Query string for `GET /api/trackers`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TrackerQuery {
        pub user_id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TrackerView {
        pub id: String,
        pub user_id: String,
        pub name: String,
        pub currency: Currency,
        pub created_at: DateTime<Utc>,
    }
}

pub mod expense {
    use super::*;

    /// Request body for `POST /api/expenses`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseNew {
        pub tracker_id: String,
        pub amount: f64,
        pub category: String,
        pub description: Option<String>,
        pub date: String,
    }

    /// Query string for `GET /api/expenses` and `GET /api/summary`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseQuery {
        pub tracker_id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        pub id: String,
        pub tracker_id: String,
        pub amount: f64,
        pub category: String,
        pub description: String,
        pub date: String,
        pub created_at: DateTime<Utc>,
    }
}

pub mod summary {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryTotalView {
        pub category: String,
        pub total: f64,
    }

    /// Response body for `GET /api/summary`, entries sorted by total
    /// descending.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SummaryResponse {
        pub entries: Vec<CategoryTotalView>,
        pub grand_total: f64,
    }
}

/// Response body for deletions.
#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
    pub success: bool,
}
