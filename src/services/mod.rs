// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod coach;
pub mod llm;
pub mod motivation;
pub mod passwords;

pub use coach::{Augmented, CoachService, MatchSummary};
pub use llm::{DisabledGenerator, GeminiClient, GenerationError, GenerationRequest, TextGenerator};
pub use motivation::DailyMotivation;
