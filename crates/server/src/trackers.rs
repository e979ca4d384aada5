//! Tracker API endpoints.
use api_types::{
    Deleted,
    tracker::{TrackerNew, TrackerQuery, TrackerView},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use store::{NewTracker, StoreError};

use crate::{ServerError, currency_to_api, currency_to_store, parse_id, server::ServerState};

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TrackerQuery>,
) -> Result<Json<Vec<TrackerView>>, ServerError> {
    let Some(user_id) = parse_id(&query.user_id) else {
        return Ok(Json(Vec::new()));
    };
    let trackers = state.store.trackers_by_user(user_id).await?;
    Ok(Json(trackers.into_iter().map(tracker_view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TrackerNew>,
) -> Result<Json<TrackerView>, ServerError> {
    let user_id = parse_id(&payload.user_id)
        .ok_or_else(|| ServerError::Generic("User ID required".to_string()))?;
    let new_tracker = NewTracker::new(&payload.name, currency_to_store(payload.currency))?;
    let tracker = state.store.create_tracker(user_id, new_tracker).await?;
    Ok(Json(tracker_view(tracker)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ServerError> {
    let deleted = match parse_id(&id) {
        Some(id) => state.store.delete_tracker(id).await?,
        None => false,
    };
    if !deleted {
        return Err(ServerError::Store(StoreError::NotFound(id)));
    }
    Ok(Json(Deleted { success: true }))
}

fn tracker_view(tracker: store::Tracker) -> TrackerView {
    TrackerView {
        id: tracker.id.to_string(),
        user_id: tracker.user_id.to_string(),
        name: tracker.name,
        currency: currency_to_api(tracker.currency),
        created_at: tracker.created_at,
    }
}
