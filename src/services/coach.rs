// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AI coaching adapter.
//!
//! Builds the coaching prompts, calls the [`TextGenerator`] and turns every
//! failure into a fixed fallback. Callers always get usable content and a
//! tag saying where it came from; generation errors never reach a handler.

use crate::models::{Bracket, Category, ContentSource, ExercisePlan, MatchResult, Scores, Training};
use crate::services::llm::{GenerationError, GenerationRequest, TextGenerator};
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

/// Summary shown before the user has logged any training.
pub const EMPTY_JOURNAL_SUMMARY: &str = "Start your journal to activate the coach!";

const TRAINING_FALLBACK: &str = "No analysis available right now.";
const MATCH_FALLBACK: &str = "Match analysis unavailable right now.";
const SUMMARY_FALLBACK: &str = "Analysis temporarily unavailable.";

/// Built-in quotes used when the model cannot provide one.
const FALLBACK_QUOTES: &[&str] = &[
    "Every shuttle you chase today is a point you win tomorrow.",
    "Fast feet, calm mind, sharp racket.",
    "Champions are built in the sessions nobody watches.",
    "Play the next rally, not the last one.",
    "Discipline beats motivation. Show up and swing.",
    "Your footwork is your foundation. Build it daily.",
    "Lose the fear of the smash and the court is yours.",
];

/// Generated content or the placeholder used in its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Augmented<T> {
    Generated(T),
    Fallback(T),
}

impl<T> Augmented<T> {
    pub fn source(&self) -> ContentSource {
        match self {
            Augmented::Generated(_) => ContentSource::Generated,
            Augmented::Fallback(_) => ContentSource::Fallback,
        }
    }

    pub fn into_parts(self) -> (T, ContentSource) {
        let source = self.source();
        match self {
            Augmented::Generated(value) | Augmented::Fallback(value) => (value, source),
        }
    }
}

/// Why a structured plan from the model was rejected.
#[derive(Debug, thiserror::Error)]
pub enum PlanParseError {
    #[error("no JSON object in model output")]
    NoObject,

    #[error("malformed plan: {0}")]
    Json(#[from] serde_json::Error),

    #[error("plan has no main exercises")]
    EmptyMain,
}

/// Details of a match used to prompt for an analysis.
#[derive(Debug, Clone, Copy)]
pub struct MatchSummary<'a> {
    pub category: Category,
    pub bracket: Bracket,
    pub result: MatchResult,
    pub scores: &'a Scores,
    pub description: &'a str,
}

/// Coaching adapter over a text generator.
#[derive(Clone)]
pub struct CoachService {
    generator: Arc<dyn TextGenerator>,
}

impl CoachService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    async fn ask(&self, task: &'static str, request: GenerationRequest) -> Option<String> {
        let outcome = match self.generator.generate(&request).await {
            Ok(text) if text.trim().is_empty() => Err(GenerationError::Empty),
            other => other,
        };

        match outcome {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(task, error = %e, "Text generation failed, using fallback");
                None
            }
        }
    }

    async fn ask_text(&self, task: &'static str, prompt: String, fallback: &str) -> Augmented<String> {
        match self.ask(task, GenerationRequest::text(prompt)).await {
            Some(text) => Augmented::Generated(text.trim().to_string()),
            None => Augmented::Fallback(fallback.to_string()),
        }
    }

    /// Short technical comment on a logged training session.
    pub async fn training_feedback(&self, theme: &str, notes: &str, rating: u8) -> Augmented<String> {
        let prompt = format!(
            "You are a badminton coach. Session theme: {theme}. Player notes: \"{notes}\". \
             Self-rating: {rating}/10. Give short, technical feedback (at most 3 sentences)."
        );
        self.ask_text("training_feedback", prompt, TRAINING_FALLBACK).await
    }

    /// Short analysis and advice for a recorded match.
    pub async fn match_feedback(&self, summary: MatchSummary<'_>) -> Augmented<String> {
        let prompt = format!(
            "You are a badminton coach. Match: {} {}. Score: {}. Result: {}. \
             Player's impressions: \"{}\". Give a short analysis and one piece of advice.",
            summary.category.label(),
            summary.bracket.label(),
            summary.scores.summary(),
            summary.result.label(),
            summary.description,
        );
        self.ask_text("match_feedback", prompt, MATCH_FALLBACK).await
    }

    /// Form analysis over the most recent sessions, newest first.
    ///
    /// With no sessions this returns [`EMPTY_JOURNAL_SUMMARY`] without
    /// calling the model.
    pub async fn dashboard_summary(&self, recent: &[Training]) -> Augmented<String> {
        if recent.is_empty() {
            return Augmented::Fallback(EMPTY_JOURNAL_SUMMARY.to_string());
        }

        let sessions: Vec<String> = recent
            .iter()
            .map(|t| format!("- {} (rating: {}/10, feeling: \"{}\")", t.theme, t.rating, t.notes))
            .collect();
        let prompt = format!(
            "Act as a personal sports coach. Here are the player's last {} sessions:\n{}\n\
             Analyse their current form in 4 or 5 detailed sentences, then add one sentence \
             of intense motivation. Address the player directly. No bold, no Markdown.",
            recent.len(),
            sessions.join("\n"),
        );
        self.ask_text("dashboard_summary", prompt, SUMMARY_FALLBACK).await
    }

    /// A 45 minute physical preparation plan for `focus`.
    pub async fn physical_plan(&self, focus: &str) -> Augmented<ExercisePlan> {
        let prompt = format!(
            "You are an expert strength and conditioning coach for badminton. \
             Design a 45 minute session focused on \"{focus}\". \
             Answer with ONLY a valid JSON object, no text before or after, with exactly this \
             structure: {{ \"warmup\": [\"...\"], \"main\": [\"...\"], \"cooldown\": [\"...\"] }}"
        );

        let Some(raw) = self.ask("physical_plan", GenerationRequest::json(prompt)).await else {
            return Augmented::Fallback(fallback_plan());
        };

        match parse_plan(&raw) {
            Ok(plan) => Augmented::Generated(plan),
            Err(e) => {
                tracing::warn!(error = %e, focus, "Discarding malformed plan, using fallback");
                Augmented::Fallback(fallback_plan())
            }
        }
    }

    /// One motivational sentence for badminton players.
    pub async fn motivation_quote(&self, date: NaiveDate) -> Augmented<String> {
        let prompt = "Write one short, original motivational sentence for a badminton player. \
                      Answer with the sentence only, no quotes."
            .to_string();
        let quote = self
            .ask("motivation_quote", GenerationRequest::text(prompt))
            .await
            .map(|text| text.trim().trim_matches('"').trim().to_string());

        match quote {
            Some(text) if !text.is_empty() => Augmented::Generated(text),
            Some(_) => {
                tracing::warn!("Model returned an empty quote, using fallback");
                Augmented::Fallback(fallback_quote(date).to_string())
            }
            None => Augmented::Fallback(fallback_quote(date).to_string()),
        }
    }
}

/// Extract an [`ExercisePlan`] from raw model output.
///
/// Tolerates Markdown code fences and prose around the object. Entries are
/// trimmed and blank ones dropped.
pub fn parse_plan(raw: &str) -> Result<ExercisePlan, PlanParseError> {
    let unfenced = raw.replace("```json", "").replace("```", "");
    let start = unfenced.find('{').ok_or(PlanParseError::NoObject)?;
    let end = unfenced.rfind('}').ok_or(PlanParseError::NoObject)?;
    if end < start {
        return Err(PlanParseError::NoObject);
    }

    let mut plan: ExercisePlan = serde_json::from_str(&unfenced[start..=end])?;
    for block in [&mut plan.warmup, &mut plan.main, &mut plan.cooldown] {
        *block = block
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect();
    }

    if plan.main.is_empty() {
        return Err(PlanParseError::EmptyMain);
    }
    Ok(plan)
}

/// Generic session returned when no plan could be generated.
pub fn fallback_plan() -> ExercisePlan {
    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    ExercisePlan {
        warmup: list(&[
            "5 min light jogging",
            "Dynamic stretches: leg swings, arm circles, hip openers",
            "2 x 30 s split-step and shadow footwork",
        ]),
        main: list(&[
            "4 x 10 alternating lunges to the four corners",
            "3 x 12 jump squats",
            "3 x 30 s lateral shuffles",
            "3 x 45 s plank",
        ]),
        cooldown: list(&[
            "5 min easy walk",
            "Static stretches: calves, quadriceps, hamstrings, shoulders",
        ]),
    }
}

/// Built-in quote for a given day. Stable for the whole day.
pub fn fallback_quote(date: NaiveDate) -> &'static str {
    let index = date.num_days_from_ce().rem_euclid(FALLBACK_QUOTES.len() as i32) as usize;
    FALLBACK_QUOTES[index]
}
