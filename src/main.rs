// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Badminton Coach API Server
//!
//! Training journal, match log and physical preparation planner with
//! AI-generated coaching feedback.

use badminton_coach::{
    config::Config,
    db::Database,
    services::{CoachService, DailyMotivation, DisabledGenerator, GeminiClient, TextGenerator},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Badminton Coach API");

    let db = Database::connect(&config.store).await?;

    // One-shot cleanup of role values written by older clients
    let migrated = db.migrate_legacy_roles().await?;
    tracing::info!(migrated, "Legacy role migration complete");

    let generator: Arc<dyn TextGenerator> = match &config.gemini_api_key {
        Some(key) => {
            tracing::info!(model = %config.gemini_model, "Gemini text generation enabled");
            Arc::new(GeminiClient::new(
                key.clone(),
                config.gemini_model.clone(),
                config.gemini_base_url.clone(),
            ))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set; coaching uses fallback content only");
            Arc::new(DisabledGenerator)
        }
    };

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        coach: CoachService::new(generator),
        motivation: DailyMotivation::new(),
    });

    // Build router
    let app = badminton_coach::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("badminton_coach=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
