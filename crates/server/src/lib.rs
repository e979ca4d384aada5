//! Thin HTTP layer over the storage contract.
//!
//! Handlers validate payloads, call [`store::Store`] and shape the response;
//! every invariant lives below this crate.
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use store::StoreError;
use uuid::Uuid;

pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod auth;
mod expenses;
mod server;
mod summary;
mod trackers;

pub enum ServerError {
    Store(StoreError),
    Generic(String),
    Unauthorized,
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_store_error(err: &StoreError) -> StatusCode {
    match err {
        StoreError::Validation(_) => StatusCode::BAD_REQUEST,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Conflict(_) => StatusCode::CONFLICT,
        StoreError::Corrupt(_)
        | StoreError::Database(_)
        | StoreError::Io(_)
        | StoreError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_store_error(err: StoreError) -> String {
    match err {
        StoreError::Corrupt(_) | StoreError::Database(_) | StoreError::Io(_)
        | StoreError::Serialize(_) => {
            tracing::error!("storage error: {err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Store(err) => (status_for_store_error(&err), message_for_store_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid PIN".to_string()),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Ids arrive as path/query strings; anything that does not parse can never
/// name an existing record.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

fn currency_to_store(currency: api_types::Currency) -> store::Currency {
    match currency {
        api_types::Currency::Usd => store::Currency::Usd,
        api_types::Currency::Inr => store::Currency::Inr,
    }
}

fn currency_to_api(currency: store::Currency) -> api_types::Currency {
    match currency {
        store::Currency::Usd => api_types::Currency::Usd,
        store::Currency::Inr => api_types::Currency::Inr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let res = ServerError::from(StoreError::Validation("bad".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let res = ServerError::from(StoreError::NotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflict_maps_to_409() {
        let res = ServerError::from(StoreError::Conflict("1234".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn storage_failure_maps_to_500() {
        let res = ServerError::from(StoreError::Io(std::io::Error::other("disk"))).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let res = ServerError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
