//! Experience and difficulty enums for fitgen.
//!
//! Both enums use `snake_case` serialization and expose `as_str()` for the
//! representation stored in SQL. Profiles store experience as free text, so
//! the mapping from experience to difficulty is total: anything that does not
//! parse lands on [`Difficulty::Medium`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ExperienceLevel
// ---------------------------------------------------------------------------

/// Self-reported training experience from a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Lenient parse of a stored profile value.
    ///
    /// Surrounding whitespace and ASCII case are ignored. Returns `None` for
    /// absent or unrecognized values.
    #[must_use]
    pub fn from_profile(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| v.trim().to_ascii_lowercase().parse().ok())
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(CoreError::UnknownVariant {
                kind: "experience level",
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Difficulty classification persisted on a routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Map a profile's experience level to a routine difficulty.
    ///
    /// ```text
    /// beginner     → easy
    /// intermediate → medium
    /// advanced     → hard
    /// else / None  → medium
    /// ```
    #[must_use]
    pub fn for_experience(level: Option<&str>) -> Self {
        ExperienceLevel::from_profile(level).map_or(Self::Medium, Self::from)
    }
}

impl From<ExperienceLevel> for Difficulty {
    fn from(level: ExperienceLevel) -> Self {
        match level {
            ExperienceLevel::Beginner => Self::Easy,
            ExperienceLevel::Intermediate => Self::Medium,
            ExperienceLevel::Advanced => Self::Hard,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(CoreError::UnknownVariant {
                kind: "difficulty",
                value: other.to_string(),
            }),
        }
    }
}
