// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin authorization layer.

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use axum::{extract::Request, middleware::Next, response::Response};

/// Reject callers whose role is not admin.
///
/// Must run after [`require_auth`](super::require_auth), which attaches
/// the [`AuthUser`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or(AppError::Unauthorized)?;

    if !user.is_admin() {
        tracing::warn!(
            user_id = %user.user_id,
            path = %request.uri().path(),
            "Non-admin attempted admin route"
        );
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(request).await)
}
