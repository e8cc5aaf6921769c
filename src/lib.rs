// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Badminton Coach: training journal backend with an AI coach
//!
//! This crate provides the REST API for logging training sessions, match
//! results and physical preparation programs, with coaching commentary
//! generated by a language model.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::{CoachService, DailyMotivation};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub coach: CoachService,
    pub motivation: DailyMotivation,
}
