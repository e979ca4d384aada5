//! Expense API endpoints.
use api_types::{
    Deleted,
    expense::{ExpenseNew, ExpenseQuery, ExpenseView},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use store::{NewExpense, StoreError};

use crate::{ServerError, parse_id, server::ServerState};

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ExpenseQuery>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let Some(tracker_id) = parse_id(&query.tracker_id) else {
        return Ok(Json(Vec::new()));
    };
    let expenses = state.store.expenses_by_tracker(tracker_id).await?;
    Ok(Json(expenses.into_iter().map(expense_view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<Json<ExpenseView>, ServerError> {
    let new_expense = NewExpense::new(
        &payload.tracker_id,
        payload.amount,
        &payload.category,
        payload.description.as_deref(),
        &payload.date,
    )?;

    // Resolve the owning tracker before inserting; the file backend does not
    // check referential existence itself.
    if state
        .store
        .tracker_by_id(new_expense.tracker_id)
        .await?
        .is_none()
    {
        return Err(ServerError::Store(StoreError::NotFound(payload.tracker_id)));
    }

    let expense = state.store.create_expense(new_expense).await?;
    Ok(Json(expense_view(expense)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ServerError> {
    let deleted = match parse_id(&id) {
        Some(id) => state.store.delete_expense(id).await?,
        None => false,
    };
    if !deleted {
        return Err(ServerError::Store(StoreError::NotFound(id)));
    }
    Ok(Json(Deleted { success: true }))
}

pub(crate) fn expense_view(expense: store::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id.to_string(),
        tracker_id: expense.tracker_id.to_string(),
        amount: expense.amount.to_f64(),
        category: expense.category,
        description: expense.description,
        date: expense.date.to_string(),
        created_at: expense.created_at,
    }
}
