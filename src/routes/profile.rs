// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile and avatar routes.

use crate::error::{AppError, Result};
use crate::extract::{not_blank, ValidatedJson};
use crate::middleware::AuthUser;
use crate::models::PublicUser;
use crate::routes::auth::{current_user, normalize_email, UserUpdateResponse};
use crate::services::passwords::hash_password;
use crate::AppState;
use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Extension, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use std::sync::Arc;
use validator::{Validate, ValidationError};

/// Largest accepted avatar value. Firestore documents are capped at 1 MiB
/// and the avatar shares the user document.
pub const MAX_AVATAR_BYTES: usize = 900 * 1024;

/// Request body limit on the avatar route.
const AVATAR_BODY_LIMIT: usize = 1024 * 1024;

/// Profile routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/user/profile", get(get_profile).put(update_profile))
        .route(
            "/api/user/update-avatar",
            post(update_avatar).layer(DefaultBodyLimit::max(AVATAR_BODY_LIMIT)),
        )
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100), custom(function = not_blank))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    /// Empty string clears the username.
    #[validate(length(max = 30))]
    pub username: Option<String>,
    #[validate(length(min = 6))]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvatarRequest {
    #[validate(custom(function = validate_avatar))]
    pub avatar_url: String,
}

/// Accept an http(s) URL or a base64 `data:image/...` URI within the size cap.
pub fn validate_avatar(value: &str) -> std::result::Result<(), ValidationError> {
    if value.len() > MAX_AVATAR_BYTES {
        return Err(ValidationError::new("avatar_too_large"));
    }

    if value.starts_with("https://") || value.starts_with("http://") {
        return Ok(());
    }

    let payload = value
        .strip_prefix("data:image/")
        .and_then(|rest| rest.split_once(";base64,"))
        .filter(|(subtype, _)| !subtype.is_empty())
        .map(|(_, payload)| payload)
        .ok_or_else(|| ValidationError::new("avatar_format"))?;

    STANDARD
        .decode(payload)
        .map_err(|_| ValidationError::new("avatar_encoding"))?;
    Ok(())
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<PublicUser>> {
    let user = current_user(&state, &auth).await?;
    Ok(Json(PublicUser::from(&user)))
}

/// Partial profile update. Email and username stay unique across users.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<UserUpdateResponse>> {
    let mut user = current_user(&state, &auth).await?;

    if let Some(name) = req.name {
        user.name = name.trim().to_string();
    }

    if let Some(email) = req.email {
        let email = normalize_email(&email);
        if email != user.email {
            if let Some(other) = state.db.find_user_by_email(&email).await? {
                if other.id != user.id {
                    return Err(AppError::Conflict("Email already in use".to_string()));
                }
            }
            user.email = email;
        }
    }

    if let Some(username) = req.username {
        let username = username.trim();
        if username.is_empty() {
            user.username = None;
        } else if user.username.as_deref() != Some(username) {
            if let Some(other) = state.db.find_user_by_username(username).await? {
                if other.id != user.id {
                    return Err(AppError::Conflict("Username already taken".to_string()));
                }
            }
            user.username = Some(username.to_string());
        }
    }

    if let Some(password) = req.password {
        user.password = hash_password(password, state.config.bcrypt_cost).await?;
    }

    state.db.save(&user).await?;
    tracing::info!(user_id = %user.id, "Profile updated");

    Ok(Json(UserUpdateResponse {
        message: "Profile updated".to_string(),
        user: PublicUser::from(&user),
    }))
}

async fn update_avatar(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<UpdateAvatarRequest>,
) -> Result<Json<UserUpdateResponse>> {
    let mut user = current_user(&state, &auth).await?;
    user.avatar = Some(req.avatar_url);
    state.db.save(&user).await?;

    tracing::info!(user_id = %user.id, "Avatar updated");
    Ok(Json(UserUpdateResponse {
        message: "Avatar updated".to_string(),
        user: PublicUser::from(&user),
    }))
}
