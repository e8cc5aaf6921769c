// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training journal routes.

use crate::error::Result;
use crate::extract::{not_blank, RecordId, ValidatedJson};
use crate::middleware::AuthUser;
use crate::models::Training;
use crate::routes::MessageResponse;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Training routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/trainings", get(list_trainings).post(create_training))
        .route("/api/trainings/{id}", delete(delete_training))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTrainingRequest {
    #[validate(length(max = 200), custom(function = not_blank))]
    pub theme: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub notes: String,
    #[validate(range(max = 10))]
    pub rating: u8,
}

async fn list_trainings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Training>>> {
    Ok(Json(state.db.list_owned(&user.user_id).await?))
}

/// Log a session. The coach comment is generated inline; on failure the
/// session is still saved, with a fallback comment.
async fn create_training(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<CreateTrainingRequest>,
) -> Result<(StatusCode, Json<Training>)> {
    let theme = req.theme.trim().to_string();
    let notes = req.notes.trim().to_string();

    let (ai_feedback, ai_feedback_source) = state
        .coach
        .training_feedback(&theme, &notes, req.rating)
        .await
        .into_parts();

    let training = Training {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.user_id,
        date: now_rfc3339(),
        theme,
        notes,
        rating: req.rating,
        ai_feedback,
        ai_feedback_source,
    };
    state.db.save(&training).await?;

    tracing::info!(
        user_id = %training.user_id,
        training_id = %training.id,
        source = ?training.ai_feedback_source,
        "Training created"
    );
    Ok((StatusCode::CREATED, Json(training)))
}

async fn delete_training(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    RecordId(id): RecordId,
) -> Result<Json<MessageResponse>> {
    state.db.delete_owned::<Training>(&id, &user.user_id).await?;
    Ok(MessageResponse::new("Training deleted"))
}
