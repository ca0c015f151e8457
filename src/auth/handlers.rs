use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest, RegisterResponse},
        repo,
        repo_types::User,
        services::{hash_password, is_valid_email, verify_password, AuthUser, Claims, JwtKeys},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.name.trim().is_empty()
        || payload.email.is_empty()
        || payload.phone.trim().is_empty()
        || payload.password.is_empty()
    {
        warn!("registration with missing fields");
        return Err(ApiError::Validation("all fields are required".into()));
    }

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("invalid email".into()));
    }

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("user already exists".into()));
    }

    let hash = hash_password(&payload.password)?;
    let profile_picture = payload.profile_picture.unwrap_or_default();

    let user = match User::create(
        &state.db,
        payload.name.trim(),
        &payload.email,
        payload.phone.trim(),
        &hash,
        &profile_picture,
    )
    .await
    {
        Ok(u) => u,
        // Lost the insert race to a concurrent registration with the same
        // email; the constraint, not the pre-check, is the source of truth.
        Err(e) if repo::is_unique_violation(&e) => {
            warn!(email = %payload.email, "duplicate email on insert");
            return Err(ApiError::Conflict("user already exists".into()));
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "user registered".into(),
            user: PublicUser::from(user),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    // Unknown email and wrong password share one rejection; only the log
    // tells them apart.
    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        token,
        user: PublicUser::from(user),
    }))
}

/// Answers straight from the verified claims; no store round-trip.
#[instrument(skip_all)]
pub async fn me(AuthUser(claims): AuthUser) -> Json<Claims> {
    Json(claims)
}
