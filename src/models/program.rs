// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Physical preparation programs.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::ValidationError;

/// Upper bound on exercises per block.
pub const MAX_EXERCISES_PER_BLOCK: usize = 30;
/// Upper bound on a single exercise description.
pub const MAX_EXERCISE_LEN: usize = 500;

/// A three-block exercise plan. Order within each block is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(deny_unknown_fields)]
pub struct ExercisePlan {
    pub warmup: Vec<String>,
    pub main: Vec<String>,
    pub cooldown: Vec<String>,
}

impl ExercisePlan {
    fn blocks(&self) -> [&Vec<String>; 3] {
        [&self.warmup, &self.main, &self.cooldown]
    }
}

/// Validator hook for plans submitted by clients.
pub fn validate_plan(plan: &ExercisePlan) -> Result<(), ValidationError> {
    for block in plan.blocks() {
        if block.len() > MAX_EXERCISES_PER_BLOCK {
            return Err(ValidationError::new("too_many_exercises"));
        }
        if block.iter().any(|e| e.len() > MAX_EXERCISE_LEN) {
            return Err(ValidationError::new("exercise_too_long"));
        }
    }
    if plan.main.is_empty() {
        return Err(ValidationError::new("empty_main_block"));
    }
    Ok(())
}

/// A saved program, stored in the `physical_programs` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalProgram {
    pub id: String,
    pub user_id: String,
    pub date: String,
    /// Focus label (e.g. "Explosiveness")
    pub focus: String,
    pub content: ExercisePlan,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(main: usize) -> ExercisePlan {
        ExercisePlan {
            warmup: vec!["Skipping 3 min".to_string()],
            main: (0..main).map(|i| format!("Lunge series {}", i)).collect(),
            cooldown: vec![],
        }
    }

    #[test]
    fn test_validate_plan_bounds() {
        assert!(validate_plan(&plan(4)).is_ok());
        assert!(validate_plan(&plan(0)).is_err());
        assert!(validate_plan(&plan(MAX_EXERCISES_PER_BLOCK + 1)).is_err());
    }

    #[test]
    fn test_plan_rejects_extra_keys() {
        let raw = r#"{"warmup":[],"main":["a"],"cooldown":[],"notes":"x"}"#;
        assert!(serde_json::from_str::<ExercisePlan>(raw).is_err());
    }
}
