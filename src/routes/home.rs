// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard routes.

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::{ContentSource, Training};
use crate::time_utils::today_utc;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Sessions considered by the dashboard summary.
const SUMMARY_WINDOW: u32 = 3;

/// Dashboard routes that need a token.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/home/summary", get(get_summary))
}

/// Public dashboard routes.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/home/motivation", get(get_motivation))
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SummaryResponse {
    pub summary: String,
    pub source: ContentSource,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MotivationResponse {
    pub message: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
}

/// Coach's read on the caller's recent form.
async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SummaryResponse>> {
    let recent: Vec<Training> = state
        .db
        .recent_owned(&user.user_id, SUMMARY_WINDOW)
        .await?;
    let (summary, source) = state.coach.dashboard_summary(&recent).await.into_parts();

    Ok(Json(SummaryResponse { summary, source }))
}

/// Quote of the day, shared by every user.
async fn get_motivation(State(state): State<Arc<AppState>>) -> Json<MotivationResponse> {
    let date = today_utc();
    let (message, _) = state.motivation.quote_for(date, &state.coach).await;
    Json(MotivationResponse { message, date })
}
