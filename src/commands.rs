//! Command registry
//!
//! The user-triggerable commands and the translation direction each one runs.

use crate::direction::Direction;

/// A registered translate command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// Stable identifier used to invoke the command
    pub id: &'static str,
    /// Human readable title
    pub title: &'static str,
    pub direction: Direction,
}

pub const TRANSLATE_FORWARD: CommandSpec = CommandSpec {
    id: "extension.translateJavaToCSharp",
    title: "Translate Java to C#",
    direction: Direction::JavaToTarget,
};

pub const TRANSLATE_BACKWARD: CommandSpec = CommandSpec {
    id: "extension.translateCSharpToJava",
    title: "Translate C# to Java",
    direction: Direction::TargetToJava,
};

pub static COMMANDS: [CommandSpec; 2] = [TRANSLATE_FORWARD, TRANSLATE_BACKWARD];

/// Look up a command by id
pub fn find(id: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|cmd| cmd.id == id)
}
