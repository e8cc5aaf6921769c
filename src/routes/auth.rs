// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration, login and session routes.

use crate::error::{AppError, Result};
use crate::extract::{not_blank, ValidatedJson};
use crate::middleware::auth::{create_jwt, AuthUser};
use crate::models::{PublicUser, Role, User};
use crate::services::passwords::{hash_password, verify_password};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subtle::ConstantTimeEq;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Routes reachable without a token.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

/// Session routes for authenticated users.
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn session_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/session", get(session))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/become-coach", post(become_coach))
}

/// Emails are matched case-insensitively and stored normalized.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100), custom(function = not_blank))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Token plus the public projection the client caches.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserUpdateResponse {
    pub message: String,
    pub user: PublicUser,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BecomeCoachRequest {
    #[validate(length(min = 1))]
    pub secret_code: String,
}

fn issue(state: &AppState, user: &User) -> Result<Json<AuthResponse>> {
    let token = create_jwt(&user.id, &state.config.jwt_signing_key, state.config.session_ttl_hours)?;
    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(user),
    }))
}

/// Load the caller's user document.
pub(crate) async fn current_user(state: &AppState, auth: &AuthUser) -> Result<User> {
    state
        .db
        .get(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", auth.user_id)))
}

/// Create an account and sign it in.
async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let email = normalize_email(&req.email);

    if state.db.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        name: req.name.trim().to_string(),
        email,
        password: hash_password(req.password, state.config.bcrypt_cost).await?,
        username: None,
        avatar: None,
        role: Role::Player,
        date: now_rfc3339(),
    };
    state.db.save(&user).await?;

    tracing::info!(user_id = %user.id, "User registered");
    issue(&state, &user)
}

/// Exchange email and password for a session token.
async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let email = normalize_email(&req.email);
    let user = state
        .db
        .find_user_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(req.password, user.password.clone()).await? {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id, "User logged in");
    issue(&state, &user)
}

/// Re-validate a cached session and return the current profile.
async fn session(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<SessionResponse>> {
    let user = current_user(&state, &auth).await?;
    Ok(Json(SessionResponse {
        user: PublicUser::from(&user),
    }))
}

/// Issue a fresh token for a still-valid session.
async fn refresh(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<AuthResponse>> {
    let user = current_user(&state, &auth).await?;
    issue(&state, &user)
}

/// Promote the caller to coach with the shared secret code.
async fn become_coach(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<BecomeCoachRequest>,
) -> Result<Json<UserUpdateResponse>> {
    let expected = state
        .config
        .coach_secret_code
        .as_deref()
        .ok_or_else(|| AppError::Forbidden("Coach registration is disabled".to_string()))?;

    let matches: bool = req
        .secret_code
        .trim()
        .as_bytes()
        .ct_eq(expected.as_bytes())
        .into();
    if !matches {
        tracing::warn!(user_id = %auth.user_id, "Invalid coach code");
        return Err(AppError::Forbidden("Invalid coach code".to_string()));
    }

    let mut user = current_user(&state, &auth).await?;
    if user.role == Role::Player {
        user.role = Role::Coach;
        state.db.save(&user).await?;
        tracing::info!(user_id = %user.id, "User promoted to coach");
    }

    Ok(Json(UserUpdateResponse {
        message: "Coach access granted".to_string(),
        user: PublicUser::from(&user),
    }))
}
