// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod competition;
pub mod feature;
pub mod feedback;
pub mod program;
pub mod training;
pub mod user;

pub use competition::{Bracket, Category, Competition, MatchResult, Scores, SetScore};
pub use feature::{Feature, FeatureStatus, Priority};
pub use feedback::{Feedback, FeedbackKind, FeedbackStatus};
pub use program::{ExercisePlan, PhysicalProgram};
pub use training::{ContentSource, Training};
pub use user::{PublicUser, Role, User};
