// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin console tests: role gate, user deletion cascade, feedback triage
//! and the roadmap board.

use axum::http::StatusCode;
use badminton_coach::models::{Competition, Feedback, PhysicalProgram, Training, User};
use serde_json::json;

mod common;
use common::{create_test_app, ScriptedGenerator};

#[tokio::test]
async fn test_admin_routes_forbidden_for_players_and_coaches() {
    let app = create_test_app(ScriptedGenerator::failing());
    let (player, _) = app.register("Player", "player@example.com").await;
    let (coach, _) = app.register("Coach", "coach@example.com").await;
    app.post(
        "/api/auth/become-coach",
        &coach,
        json!({ "secretCode": "smash-2026" }),
    )
    .await;

    for token in [&player, &coach] {
        for uri in ["/api/admin/users", "/api/admin/feedbacks", "/api/admin/features"] {
            let (status, body) = app.get(uri, token).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
            assert_eq!(body["error"], "forbidden");
        }
    }
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = create_test_app(ScriptedGenerator::failing());

    let (status, _) = app
        .send(axum::http::Method::GET, "/api/admin/users", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_users_hides_password_hashes() {
    let app = create_test_app(ScriptedGenerator::failing());
    let (admin, _) = app.register_admin("admin@example.com").await;
    app.register("Lin", "lin@example.com").await;

    let (status, body) = app.get("/api/admin/users", &admin).await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password").is_none()));
}

#[tokio::test]
async fn test_delete_user_cascades_to_owned_records() {
    let app = create_test_app(ScriptedGenerator::failing());
    let (admin, _) = app.register_admin("admin@example.com").await;
    let (bob, bob_id) = app.register("Bob", "bob@example.com").await;
    let (alice, _) = app.register("Alice", "alice@example.com").await;

    app.post("/api/trainings", &bob, json!({ "theme": "Serves", "rating": 6 }))
        .await;
    app.post("/api/trainings", &alice, json!({ "theme": "Clears", "rating": 7 }))
        .await;
    app.post(
        "/api/competitions",
        &bob,
        json!({ "category": "tournament", "bracket": "doubles", "result": "win" }),
    )
    .await;
    app.post(
        "/api/prepa/save",
        &bob,
        json!({ "focus": "Core", "program": { "warmup": [], "main": ["Plank"], "cooldown": [] } }),
    )
    .await;
    app.post("/api/feedback", &bob, json!({ "type": "feature", "message": "Dark mode" }))
        .await;

    let (status, _) = app
        .delete(&format!("/api/admin/users/{}", bob_id), &admin)
        .await;
    assert_eq!(status, StatusCode::OK);

    let users: Vec<User> = app.state.db.list_all().await.unwrap();
    assert!(users.iter().all(|u| u.id != bob_id));

    let trainings: Vec<Training> = app.state.db.list_all().await.unwrap();
    assert_eq!(trainings.len(), 1);
    assert_eq!(trainings[0].theme, "Clears");

    let competitions: Vec<Competition> = app.state.db.list_all().await.unwrap();
    let programs: Vec<PhysicalProgram> = app.state.db.list_all().await.unwrap();
    let feedbacks: Vec<Feedback> = app.state.db.list_all().await.unwrap();
    assert!(competitions.is_empty());
    assert!(programs.is_empty());
    assert!(feedbacks.is_empty());

    // Outstanding tokens die with the account
    let (status, body) = app.get("/api/trainings", &bob).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_delete_user_edge_cases() {
    let app = create_test_app(ScriptedGenerator::failing());
    let (admin, admin_id) = app.register_admin("admin@example.com").await;

    let (status, _) = app
        .delete(&format!("/api/admin/users/{}", admin_id), &admin)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.delete("/api/admin/users/nobody", &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_feedback_triage() {
    let app = create_test_app(ScriptedGenerator::failing());
    let (admin, _) = app.register_admin("admin@example.com").await;
    let (lin, _) = app.register("Lin", "lin@example.com").await;

    let (_, submitted) = app
        .post("/api/feedback", &lin, json!({ "type": "bug", "message": "Crash on save" }))
        .await;
    let uri = format!("/api/admin/feedbacks/{}", submitted["id"].as_str().unwrap());

    let (_, list) = app.get("/api/admin/feedbacks", &admin).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = app.put(&uri, &admin, json!({ "status": "resolved" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "resolved");

    let (status, _) = app.delete(&uri, &admin).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.delete(&uri, &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_feature_board_moves() {
    let app = create_test_app(ScriptedGenerator::failing());
    let (admin, admin_id) = app.register_admin("admin@example.com").await;

    let (status, created) = app
        .post(
            "/api/admin/features",
            &admin,
            json!({ "title": "Offline mode", "priority": "high", "startDate": "2026-04-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["progress"], 0);
    assert_eq!(created["createdBy"], admin_id.as_str());
    let id = created["id"].as_str().unwrap();

    let (_, body) = app
        .put(
            &format!("/api/admin/features/{}", id),
            &admin,
            json!({ "status": "in_progress", "progress": 40 }),
        )
        .await;
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["progress"], 40);

    let status_uri = format!("/api/admin/features/{}/status", id);
    let (status, body) = app.put(&status_uri, &admin, json!({ "status": "done" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"], 100);

    let (_, body) = app.put(&status_uri, &admin, json!({ "status": "pending" })).await;
    assert_eq!(body["progress"], 0);

    // Legacy column names still accepted
    let (_, body) = app.put(&status_uri, &admin, json!({ "status": "termine" })).await;
    assert_eq!(body["status"], "done");
}

#[tokio::test]
async fn test_feature_date_order_enforced() {
    let app = create_test_app(ScriptedGenerator::failing());
    let (admin, _) = app.register_admin("admin@example.com").await;

    let (status, _) = app
        .post(
            "/api/admin/features",
            &admin,
            json!({ "title": "Stats", "startDate": "2026-06-01", "endDate": "2026-05-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, created) = app
        .post(
            "/api/admin/features",
            &admin,
            json!({ "title": "Stats", "startDate": "2026-06-01" }),
        )
        .await;
    let uri = format!("/api/admin/features/{}", created["id"].as_str().unwrap());

    let (status, _) = app.put(&uri, &admin, json!({ "endDate": "2026-05-01" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.put(&uri, &admin, json!({ "startDate": "" })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["startDate"].is_null());

    let (status, _) = app.delete(&uri, &admin).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.delete(&uri, &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_routes_treat_malformed_ids_as_missing() {
    let app = create_test_app(ScriptedGenerator::failing());
    let (admin, _) = app.register_admin("admin@example.com").await;

    let (status, _) = app.delete("/api/admin/users/a%2Fb", &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .put("/api/admin/feedbacks/a%2Fb", &admin, json!({ "status": "resolved" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete("/api/admin/feedbacks/__x__", &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .put("/api/admin/features/a%2Fb/status", &admin, json!({ "status": "done" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .put("/api/admin/features/a%2Fb", &admin, json!({ "title": "Stats" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete("/api/admin/features/a%2Fb", &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
