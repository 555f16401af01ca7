//! Prompt composition.
//!
//! [`compose_prompt`] is pure: identical inputs always render identical text.
//! The catalog is enumerated line by line so the model can only pick from a
//! literal list, and the reply format is pinned to a single JSON object.

use std::fmt::Write as _;

use fit_core::entities::{CatalogEntry, UserContext};

/// Label used for any profile attribute that is absent or blank.
pub const NOT_SPECIFIED: &str = "not specified";

pub const MIN_EXERCISES: usize = 4;
pub const MAX_EXERCISES: usize = 8;

/// Human-readable label for a goal code. Unknown codes pass through as-is.
#[must_use]
pub fn goal_label(code: Option<&str>) -> &str {
    let Some(code) = present(code) else {
        return NOT_SPECIFIED;
    };
    match code {
        "lose_weight" => "lose weight",
        "gain_muscle" => "gain muscle mass",
        "maintain" => "maintain current fitness",
        "improve_endurance" => "improve endurance",
        "increase_strength" => "increase strength",
        "improve_flexibility" => "improve flexibility",
        other => other,
    }
}

/// Human-readable label for an experience code. Unknown codes pass through.
#[must_use]
pub fn experience_label(code: Option<&str>) -> &str {
    let Some(code) = present(code) else {
        return NOT_SPECIFIED;
    };
    match code {
        "beginner" => "beginner (new to structured training)",
        "intermediate" => "intermediate (trains regularly)",
        "advanced" => "advanced (several years of consistent training)",
        other => other,
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Render the generation request for `user` restricted to `catalog`.
#[must_use]
pub fn compose_prompt(user: &UserContext, catalog: &[CatalogEntry]) -> String {
    let mut prompt = String::with_capacity(1024 + catalog.len() * 48);

    prompt.push_str(
        "You are a certified personal trainer. Design one workout routine for the user below.\n\n",
    );

    prompt.push_str("User profile:\n");
    let _ = writeln!(prompt, "- name: {}", user.name);
    let _ = writeln!(prompt, "- goal: {}", goal_label(user.goal.as_deref()));
    let _ = writeln!(
        prompt,
        "- experience: {}",
        experience_label(user.experience_level.as_deref())
    );
    let _ = writeln!(
        prompt,
        "- lifestyle: {}",
        present(user.lifestyle.as_deref()).unwrap_or(NOT_SPECIFIED)
    );
    let _ = writeln!(
        prompt,
        "- gender: {}",
        present(user.gender.as_deref()).unwrap_or(NOT_SPECIFIED)
    );

    prompt.push_str("\nAvailable exercises (the only ones you may use):\n");
    for entry in catalog {
        let _ = writeln!(
            prompt,
            "- id: {} | name: {} | difficulty: {}",
            entry.id,
            entry.name,
            entry.difficulty.as_deref().unwrap_or(NOT_SPECIFIED)
        );
    }

    let _ = write!(
        prompt,
        "\nRules:\n\
         1. Choose between {MIN_EXERCISES} and {MAX_EXERCISES} exercises.\n\
         2. Every \"id_exercise\" must be one of the ids listed above. Never invent ids.\n\
         3. Match volume and intensity to the user's goal and experience.\n\
         4. \"sets\" and \"rest\" (seconds) are integers; \"reps\" is a number or a range string such as \"10-12\".\n\
         5. \"reason\" is one short sentence explaining the choice.\n\n\
         Reply with ONLY a JSON object of exactly this shape. No prose, no Markdown, no code fences:\n"
    );
    prompt.push_str(
        r#"{
  "routineName": "string",
  "description": "string",
  "exercises": [
    {"id_exercise": 1, "sets": 3, "reps": "10-12", "rest": 60, "reason": "string"}
  ]
}
"#,
    );

    prompt
}
