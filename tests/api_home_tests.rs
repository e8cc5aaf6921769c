// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard summary and daily motivation tests.

use axum::http::{Method, StatusCode};
use badminton_coach::services::coach::EMPTY_JOURNAL_SUMMARY;
use serde_json::json;

mod common;
use common::{create_test_app, ScriptedGenerator};

#[tokio::test]
async fn test_summary_with_empty_journal_skips_model() {
    let app = create_test_app(ScriptedGenerator::replying("should not be used"));
    let (token, _) = app.register("Lin", "lin@example.com").await;

    let (status, body) = app.get("/api/home/summary", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], EMPTY_JOURNAL_SUMMARY);
    assert_eq!(app.generator.calls(), 0);
}

#[tokio::test]
async fn test_summary_uses_recent_sessions() {
    let app = create_test_app(ScriptedGenerator::replying("Solid week."));
    let (token, _) = app.register("Lin", "lin@example.com").await;

    for theme in ["Clears", "Drops", "Smashes", "Serves"] {
        app.post(
            "/api/trainings",
            &token,
            json!({ "theme": theme, "rating": 7 }),
        )
        .await;
    }
    let before = app.generator.calls();

    app.generator.set_reply("You are on an upward curve.");
    let (status, body) = app.get("/api/home/summary", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "You are on an upward curve.");
    assert_eq!(body["source"], "generated");
    assert_eq!(app.generator.calls(), before + 1);
}

#[tokio::test]
async fn test_summary_falls_back_when_model_fails() {
    let app = create_test_app(ScriptedGenerator::failing());
    let (token, _) = app.register("Lin", "lin@example.com").await;
    app.post("/api/trainings", &token, json!({ "theme": "Lifts", "rating": 5 }))
        .await;

    let (status, body) = app.get("/api/home/summary", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert!(!body["summary"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_summary_requires_token() {
    let app = create_test_app(ScriptedGenerator::failing());

    let (status, _) = app
        .send(Method::GET, "/api/home/summary", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_motivation_is_public_and_stable_for_the_day() {
    let app = create_test_app(ScriptedGenerator::replying("\"Every shuttle counts.\""));

    let (status, first) = app
        .send(Method::GET, "/api/home/motivation", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["message"], "Every shuttle counts.");
    assert!(first["date"].is_string());

    app.generator.set_reply("A different quote");
    let (_, second) = app
        .send(Method::GET, "/api/home/motivation", None, None)
        .await;

    assert_eq!(first, second);
    assert_eq!(app.generator.calls(), 1);
}

#[tokio::test]
async fn test_motivation_fallback_is_cached_too() {
    let app = create_test_app(ScriptedGenerator::failing());

    let (_, first) = app
        .send(Method::GET, "/api/home/motivation", None, None)
        .await;
    assert!(!first["message"].as_str().unwrap().is_empty());

    let (_, second) = app
        .send(Method::GET, "/api/home/motivation", None, None)
        .await;
    assert_eq!(first["message"], second["message"]);
    assert_eq!(app.generator.calls(), 1);
}

#[tokio::test]
async fn test_motivation_never_serves_an_empty_quote() {
    let app = create_test_app(ScriptedGenerator::replying("\"\""));

    let (status, first) = app
        .send(Method::GET, "/api/home/motivation", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!first["message"].as_str().unwrap().trim().is_empty());

    let (_, second) = app
        .send(Method::GET, "/api/home/motivation", None, None)
        .await;
    assert_eq!(first["message"], second["message"]);
}
