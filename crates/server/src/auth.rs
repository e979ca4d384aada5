//! Registration and login endpoints.
//!
//! A PIN is a bearer identity token: logging in is a lookup, not a
//! credential check.
use api_types::user::{Login, Register, UserResponse, UserView};
use axum::{Json, extract::State};
use store::NewUser;

use crate::{ServerError, currency_to_api, currency_to_store, server::ServerState};

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<Register>,
) -> Result<Json<UserResponse>, ServerError> {
    let new_user = NewUser::new(
        &payload.pin,
        payload.preferred_currency.map(currency_to_store),
    )?;
    let user = state.store.create_user(new_user).await?;
    Ok(Json(UserResponse {
        user: user_view(user),
    }))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<Login>,
) -> Result<Json<UserResponse>, ServerError> {
    let pin = payload.pin.trim();
    if pin.len() != 4 || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(ServerError::Generic("Invalid PIN format".to_string()));
    }

    match state.store.user_by_pin(pin).await? {
        Some(user) => Ok(Json(UserResponse {
            user: user_view(user),
        })),
        None => Err(ServerError::Unauthorized),
    }
}

fn user_view(user: store::User) -> UserView {
    UserView {
        id: user.id.to_string(),
        pin: user.pin,
        preferred_currency: currency_to_api(user.preferred_currency),
        created_at: user.created_at,
    }
}
