//! Translation Direction
//!
//! The language pair is fixed: Java on one side, C# on the other.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Java → C#
    JavaToTarget,
    /// C# → Java
    TargetToJava,
}

impl Direction {
    pub fn source_language(&self) -> &'static str {
        match self {
            Direction::JavaToTarget => "Java",
            Direction::TargetToJava => "C#",
        }
    }

    pub fn target_language(&self) -> &'static str {
        match self {
            Direction::JavaToTarget => "C#",
            Direction::TargetToJava => "Java",
        }
    }

    /// Title of the progress indicator shown while the request is in flight
    pub fn progress_title(&self) -> String {
        format!(
            "Translating {} to {}...",
            self.source_language(),
            self.target_language()
        )
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.source_language(), self.target_language())
    }
}
