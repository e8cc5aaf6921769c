// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Roadmap items shown on the admin kanban board.

use chrono::NaiveDate;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Kanban column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    #[default]
    #[serde(alias = "en_attente")]
    Pending,
    #[serde(alias = "en_cours")]
    InProgress,
    #[serde(alias = "termine")]
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Stored in the `features` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<NaiveDate>,
    /// Admin who created the item
    pub created_by: String,
    #[serde(default)]
    pub status: FeatureStatus,
    #[serde(default)]
    pub priority: Priority,
    /// Completion percentage, 0 to 100
    #[serde(default)]
    pub progress: u8,
    pub date: String,
}

impl Feature {
    /// Move the card to another column.
    ///
    /// Finishing an item pins progress at 100; sending it back to the
    /// backlog resets it.
    pub fn move_to(&mut self, status: FeatureStatus) {
        self.status = status;
        match status {
            FeatureStatus::Done => self.progress = 100,
            FeatureStatus::Pending => self.progress = 0,
            FeatureStatus::InProgress => {}
        }
    }
}

/// Parse an optional `YYYY-MM-DD` date. Blank strings (sent by HTML date
/// inputs left empty) mean "no date".
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid date {:?}, expected YYYY-MM-DD", raw))),
    }
}
