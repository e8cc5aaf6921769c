// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User feedback submission.

use crate::error::Result;
use crate::extract::{not_blank, ValidatedJson};
use crate::middleware::AuthUser;
use crate::models::{Feedback, FeedbackKind, FeedbackStatus};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Extension, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Feedback routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/feedback", post(submit_feedback))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitFeedbackRequest {
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    #[validate(length(max = 5000), custom(function = not_blank))]
    pub message: String,
}

async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<SubmitFeedbackRequest>,
) -> Result<(StatusCode, Json<Feedback>)> {
    let feedback = Feedback {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.user_id,
        kind: req.kind,
        message: req.message.trim().to_string(),
        status: FeedbackStatus::New,
        date: now_rfc3339(),
    };
    state.db.save(&feedback).await?;

    tracing::info!(
        user_id = %feedback.user_id,
        feedback_id = %feedback.id,
        kind = ?feedback.kind,
        "Feedback submitted"
    );
    Ok((StatusCode::CREATED, Json(feedback)))
}
