//! Category summary endpoint.
use api_types::{
    expense::ExpenseQuery,
    summary::{CategoryTotalView, SummaryResponse},
};
use axum::{
    Json,
    extract::{Query, State},
};
use store::category_totals;

use crate::{ServerError, parse_id, server::ServerState};

/// Per-category totals for one tracker, largest first.
///
/// Aggregation happens in the storage crate's pure function so every
/// consumer reports the same numbers.
pub async fn get(
    State(state): State<ServerState>,
    Query(query): Query<ExpenseQuery>,
) -> Result<Json<SummaryResponse>, ServerError> {
    let expenses = match parse_id(&query.tracker_id) {
        Some(tracker_id) => state.store.expenses_by_tracker(tracker_id).await?,
        None => Vec::new(),
    };

    let mut summary = category_totals(&expenses);
    summary.entries.sort_by(|a, b| b.total.cmp(&a.total));

    Ok(Json(SummaryResponse {
        entries: summary
            .entries
            .into_iter()
            .map(|entry| CategoryTotalView {
                category: entry.category,
                total: entry.total.to_f64(),
            })
            .collect(),
        grand_total: summary.grand_total.to_f64(),
    }))
}
