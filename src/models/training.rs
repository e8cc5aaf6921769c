// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Training session model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Where a piece of AI-attached content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// Produced by the language model.
    Generated,
    /// Placeholder used because the model call failed.
    Fallback,
}

/// A logged training session, stored in the `trainings` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    pub id: String,
    /// Owner
    pub user_id: String,
    pub date: String,
    /// What the session worked on (e.g. "Net play")
    pub theme: String,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// Self-assessment, 0 to 10
    pub rating: u8,
    /// Coaching comment attached at creation
    pub ai_feedback: String,
    pub ai_feedback_source: ContentSource,
}
