// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin routes: users, feedback triage and the roadmap board.
//!
//! Authorization is handled entirely by the `require_admin` layer applied
//! in routes/mod.rs; handlers here never check roles themselves.

use crate::error::{AppError, Result};
use crate::extract::{not_blank, RecordId, ValidatedJson};
use crate::middleware::AuthUser;
use crate::models::feature::deserialize_optional_date;
use crate::models::{Feature, FeatureStatus, Feedback, FeedbackStatus, Priority, PublicUser, User};
use crate::routes::MessageResponse;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use validator::{Validate, ValidationError};

/// Admin routes. Both `require_auth` and `require_admin` are applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/{id}", axum::routing::delete(delete_user))
        .route("/api/admin/feedbacks", get(list_feedbacks))
        .route(
            "/api/admin/feedbacks/{id}",
            put(update_feedback_status).delete(delete_feedback),
        )
        .route("/api/admin/features", get(list_features).post(create_feature))
        .route(
            "/api/admin/features/{id}",
            put(update_feature).delete(delete_feature),
        )
        .route("/api/admin/features/{id}/status", put(move_feature))
}

// ─── Users ───────────────────────────────────────────────────

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<PublicUser>>> {
    let users: Vec<User> = state.db.list_all().await?;
    Ok(Json(users.iter().map(PublicUser::from).collect()))
}

/// Delete an account and everything it owns.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthUser>,
    RecordId(id): RecordId,
) -> Result<Json<MessageResponse>> {
    if id == admin.user_id {
        return Err(AppError::BadRequest(
            "Admins cannot delete their own account".to_string(),
        ));
    }

    if state.db.get::<User>(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("User {} not found", id)));
    }

    state.db.delete_user_cascade(&id).await?;
    tracing::info!(admin_id = %admin.user_id, user_id = %id, "Admin deleted user");
    Ok(MessageResponse::new("User deleted"))
}

// ─── Feedback ────────────────────────────────────────────────

async fn list_feedbacks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Feedback>>> {
    Ok(Json(state.db.list_all().await?))
}

#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackStatusRequest {
    pub status: FeedbackStatus,
}

async fn update_feedback_status(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    ValidatedJson(req): ValidatedJson<FeedbackStatusRequest>,
) -> Result<Json<Feedback>> {
    let mut feedback: Feedback = state
        .db
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Feedback {} not found", id)))?;

    feedback.status = req.status;
    state.db.save(&feedback).await?;

    tracing::info!(feedback_id = %id, status = ?feedback.status, "Feedback status updated");
    Ok(Json(feedback))
}

async fn delete_feedback(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<MessageResponse>> {
    if state.db.get::<Feedback>(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Feedback {} not found", id)));
    }
    state.db.delete::<Feedback>(&id).await?;

    tracing::info!(feedback_id = %id, "Feedback deleted");
    Ok(MessageResponse::new("Feedback deleted"))
}

// ─── Roadmap ─────────────────────────────────────────────────

fn check_date_order(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> std::result::Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => {
            Err(ValidationError::new("start_after_end"))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_new_feature_dates))]
pub struct CreateFeatureRequest {
    #[validate(length(max = 200), custom(function = not_blank))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: FeatureStatus,
    #[serde(default)]
    pub priority: Priority,
}

fn validate_new_feature_dates(
    req: &CreateFeatureRequest,
) -> std::result::Result<(), ValidationError> {
    check_date_order(req.start_date, req.end_date)
}

/// Present-but-blank means "clear the date"; absent means "leave it".
fn deserialize_date_patch<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_date(deserializer).map(Some)
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeatureRequest {
    #[validate(length(max = 200), custom(function = not_blank))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_date_patch")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_date_patch")]
    pub end_date: Option<Option<NaiveDate>>,
    pub status: Option<FeatureStatus>,
    pub priority: Option<Priority>,
    #[validate(range(max = 100))]
    pub progress: Option<u8>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MoveFeatureRequest {
    pub status: FeatureStatus,
}

async fn load_feature(state: &AppState, id: &str) -> Result<Feature> {
    state
        .db
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Feature {} not found", id)))
}

async fn list_features(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Feature>>> {
    Ok(Json(state.db.list_all().await?))
}

async fn create_feature(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<CreateFeatureRequest>,
) -> Result<(StatusCode, Json<Feature>)> {
    let mut feature = Feature {
        id: uuid::Uuid::new_v4().to_string(),
        title: req.title.trim().to_string(),
        description: req.description.trim().to_string(),
        start_date: req.start_date,
        end_date: req.end_date,
        created_by: admin.user_id,
        status: FeatureStatus::Pending,
        priority: req.priority,
        progress: 0,
        date: now_rfc3339(),
    };
    feature.move_to(req.status);
    state.db.save(&feature).await?;

    tracing::info!(feature_id = %feature.id, title = %feature.title, "Feature created");
    Ok((StatusCode::CREATED, Json(feature)))
}

/// Partial edit. A status change applies the board rules before any
/// explicit progress value.
async fn update_feature(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    ValidatedJson(req): ValidatedJson<UpdateFeatureRequest>,
) -> Result<Json<Feature>> {
    let mut feature = load_feature(&state, &id).await?;

    if let Some(title) = req.title {
        feature.title = title.trim().to_string();
    }
    if let Some(description) = req.description {
        feature.description = description.trim().to_string();
    }
    if let Some(start_date) = req.start_date {
        feature.start_date = start_date;
    }
    if let Some(end_date) = req.end_date {
        feature.end_date = end_date;
    }
    if let Some(priority) = req.priority {
        feature.priority = priority;
    }
    if let Some(status) = req.status {
        feature.move_to(status);
    }
    if let Some(progress) = req.progress {
        feature.progress = progress;
    }

    check_date_order(feature.start_date, feature.end_date)
        .map_err(|_| AppError::BadRequest("startDate must not be after endDate".to_string()))?;

    state.db.save(&feature).await?;
    tracing::info!(feature_id = %id, "Feature updated");
    Ok(Json(feature))
}

/// Move a card to another kanban column.
async fn move_feature(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    ValidatedJson(req): ValidatedJson<MoveFeatureRequest>,
) -> Result<Json<Feature>> {
    let mut feature = load_feature(&state, &id).await?;
    feature.move_to(req.status);
    state.db.save(&feature).await?;

    tracing::info!(
        feature_id = %id,
        status = ?feature.status,
        progress = feature.progress,
        "Feature moved"
    );
    Ok(Json(feature))
}

async fn delete_feature(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<MessageResponse>> {
    load_feature(&state, &id).await?;
    state.db.delete::<Feature>(&id).await?;

    tracing::info!(feature_id = %id, "Feature deleted");
    Ok(MessageResponse::new("Feature deleted"))
}
