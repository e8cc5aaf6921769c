// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Competition (match result) routes.

use crate::error::Result;
use crate::extract::{RecordId, ValidatedJson};
use crate::middleware::AuthUser;
use crate::models::competition::validate_scores;
use crate::models::{Bracket, Category, Competition, MatchResult, Scores};
use crate::routes::MessageResponse;
use crate::services::MatchSummary;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use validator::Validate;

/// Competition routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/competitions",
            get(list_competitions).post(create_competition),
        )
        .route("/api/competitions/{id}", delete(delete_competition))
}

/// Blank strings (an untouched form field) read as absent.
fn blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompetitionRequest {
    pub category: Category,
    #[serde(alias = "tableau")]
    pub bracket: Bracket,
    pub result: MatchResult,
    #[serde(default)]
    #[validate(custom(function = validate_scores))]
    pub scores: Scores,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url)]
    pub video_url: Option<String>,
}

async fn list_competitions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Competition>>> {
    Ok(Json(state.db.list_owned(&user.user_id).await?))
}

/// Record a match with an inline AI analysis (or its fallback).
async fn create_competition(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<CreateCompetitionRequest>,
) -> Result<(StatusCode, Json<Competition>)> {
    let description = req.description.trim().to_string();

    let (ai_feedback, ai_feedback_source) = state
        .coach
        .match_feedback(MatchSummary {
            category: req.category,
            bracket: req.bracket,
            result: req.result,
            scores: &req.scores,
            description: &description,
        })
        .await
        .into_parts();

    let competition = Competition {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.user_id,
        date: now_rfc3339(),
        category: req.category,
        bracket: req.bracket,
        result: req.result,
        scores: req.scores,
        description,
        video_url: req.video_url,
        ai_feedback,
        ai_feedback_source,
    };
    state.db.save(&competition).await?;

    tracing::info!(
        user_id = %competition.user_id,
        competition_id = %competition.id,
        source = ?competition.ai_feedback_source,
        "Competition created"
    );
    Ok((StatusCode::CREATED, Json(competition)))
}

async fn delete_competition(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    RecordId(id): RecordId,
) -> Result<Json<MessageResponse>> {
    state
        .db
        .delete_owned::<Competition>(&id, &user.user_id)
        .await?;
    Ok(MessageResponse::new("Competition deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_payload_accepted() {
        let req: CreateCompetitionRequest = serde_json::from_value(serde_json::json!({
            "category": "Tournoi",
            "tableau": "Simple",
            "result": "Victoire",
            "scores": {
                "set1": { "me": "21", "opp": "17" },
                "set2": { "me": 21, "opp": 19 },
                "set3": { "me": "", "opp": "" }
            },
            "description": "Good net play",
            "videoUrl": ""
        }))
        .unwrap();

        assert_eq!(req.bracket, Bracket::Singles);
        assert_eq!(req.video_url, None);
        assert_eq!(req.scores.summary(), "21-17, 21-19");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_invalid_video_url_rejected() {
        let req: CreateCompetitionRequest = serde_json::from_value(serde_json::json!({
            "category": "interclub",
            "bracket": "mixed",
            "result": "loss",
            "videoUrl": "not a url"
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }
}
