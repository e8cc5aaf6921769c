// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Competition (match) model.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::ValidationError;

use super::ContentSource;

/// Highest score a badminton game can reach (29-all goes to 30).
pub const MAX_SET_POINTS: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[serde(alias = "Tournoi", alias = "Tournament")]
    Tournament,
    #[serde(alias = "Interclub")]
    Interclub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Bracket {
    #[serde(alias = "Simple", alias = "Singles")]
    Singles,
    #[serde(alias = "Double", alias = "Doubles")]
    Doubles,
    #[serde(alias = "Mixte", alias = "Mixed")]
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    #[serde(alias = "Victoire", alias = "Win")]
    Win,
    #[serde(alias = "Défaite", alias = "Defaite", alias = "Loss")]
    Loss,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Tournament => "tournament",
            Category::Interclub => "interclub",
        }
    }
}

impl Bracket {
    pub fn label(self) -> &'static str {
        match self {
            Bracket::Singles => "singles",
            Bracket::Doubles => "doubles",
            Bracket::Mixed => "mixed",
        }
    }
}

impl MatchResult {
    pub fn label(self) -> &'static str {
        match self {
            MatchResult::Win => "win",
            MatchResult::Loss => "loss",
        }
    }
}

/// Points for one game. Both sides are `None` when the game was not played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SetScore {
    #[serde(default, deserialize_with = "deserialize_points")]
    pub me: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_points")]
    pub opp: Option<u8>,
}

impl SetScore {
    pub fn is_played(&self) -> bool {
        self.me.is_some() && self.opp.is_some()
    }
}

/// Fixed best-of-three score sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Scores {
    #[serde(default)]
    pub set1: SetScore,
    #[serde(default)]
    pub set2: SetScore,
    #[serde(default)]
    pub set3: SetScore,
}

impl Scores {
    pub fn sets(&self) -> [SetScore; 3] {
        [self.set1, self.set2, self.set3]
    }

    /// Human-readable score line of the played games, e.g. "21-15, 18-21".
    pub fn summary(&self) -> String {
        let played: Vec<String> = self
            .sets()
            .iter()
            .filter_map(|s| Some(format!("{}-{}", s.me?, s.opp?)))
            .collect();

        if played.is_empty() {
            "not recorded".to_string()
        } else {
            played.join(", ")
        }
    }
}

/// Validator hook: each game is either fully recorded or empty, within bounds.
pub fn validate_scores(scores: &Scores) -> Result<(), ValidationError> {
    for set in scores.sets() {
        if set.me.is_some() != set.opp.is_some() {
            return Err(ValidationError::new("incomplete_set"));
        }
        if set.me.unwrap_or(0) > MAX_SET_POINTS || set.opp.unwrap_or(0) > MAX_SET_POINTS {
            return Err(ValidationError::new("points_out_of_range"));
        }
    }
    Ok(())
}

/// Accepts a number, a numeric string, an empty string or null.
fn deserialize_points<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u8),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid points value: {:?}", text)))
        }
    }
}

/// A recorded match, stored in the `competitions` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub category: Category,
    pub bracket: Bracket,
    pub result: MatchResult,
    pub scores: Scores,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub video_url: Option<String>,
    pub ai_feedback: String,
    pub ai_feedback_source: ContentSource,
}
