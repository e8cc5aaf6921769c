// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Physical preparation routes.
//!
//! Programs are created in two steps: `POST /api/prepa` asks the coach for a
//! plan without storing anything, and `POST /api/prepa/save` persists the
//! plan the user chose to keep.

use crate::error::Result;
use crate::extract::{not_blank, RecordId, ValidatedJson};
use crate::middleware::AuthUser;
use crate::models::program::validate_plan;
use crate::models::{ContentSource, ExercisePlan, PhysicalProgram};
use crate::routes::MessageResponse;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Physical preparation routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/prepa", get(list_programs).post(generate_program))
        .route("/api/prepa/history", get(list_programs))
        .route("/api/prepa/save", post(save_program))
        .route("/api/prepa/{id}", delete(delete_program))
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    #[validate(length(max = 100), custom(function = not_blank))]
    pub focus: String,
}

/// A proposed plan, not yet saved.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GeneratedProgram {
    pub focus: String,
    pub program: ExercisePlan,
    pub source: ContentSource,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SaveProgramRequest {
    #[validate(length(max = 100), custom(function = not_blank))]
    pub focus: String,
    #[validate(custom(function = validate_plan))]
    pub program: ExercisePlan,
}

async fn generate_program(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<GenerateRequest>,
) -> Result<Json<GeneratedProgram>> {
    let focus = req.focus.trim().to_string();
    let (program, source) = state.coach.physical_plan(&focus).await.into_parts();

    tracing::info!(user_id = %user.user_id, focus = %focus, ?source, "Program generated");
    Ok(Json(GeneratedProgram {
        focus,
        program,
        source,
    }))
}

/// Persist a plan verbatim.
async fn save_program(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<SaveProgramRequest>,
) -> Result<(StatusCode, Json<PhysicalProgram>)> {
    let program = PhysicalProgram {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.user_id,
        date: now_rfc3339(),
        focus: req.focus.trim().to_string(),
        content: req.program,
    };
    state.db.save(&program).await?;

    tracing::info!(
        user_id = %program.user_id,
        program_id = %program.id,
        "Program saved"
    );
    Ok((StatusCode::CREATED, Json(program)))
}

async fn list_programs(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<PhysicalProgram>>> {
    Ok(Json(state.db.list_owned(&user.user_id).await?))
}

async fn delete_program(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    RecordId(id): RecordId,
) -> Result<Json<MessageResponse>> {
    state
        .db
        .delete_owned::<PhysicalProgram>(&id, &user.user_id)
        .await?;
    Ok(MessageResponse::new("Program deleted"))
}
