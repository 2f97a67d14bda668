use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One study-session operation, as triggered by a click or key press
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudyCommand {
    Flip,
    Next,
    Previous,
    MarkKnown,
    MarkUnknown,
    Restart,
}

impl StudyCommand {
    pub const ALL: [StudyCommand; 6] = [
        StudyCommand::Flip,
        StudyCommand::Next,
        StudyCommand::Previous,
        StudyCommand::MarkKnown,
        StudyCommand::MarkUnknown,
        StudyCommand::Restart,
    ];

    /// Keyboard binding of the study screen, keyed by DOM `KeyboardEvent.key` names.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(Self::Next),
            "ArrowLeft" => Some(Self::Previous),
            " " | "Space" | "Spacebar" | "Enter" => Some(Self::Flip),
            "ArrowUp" => Some(Self::MarkKnown),
            "ArrowDown" => Some(Self::MarkUnknown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flip => "flip",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::MarkKnown => "mark-known",
            Self::MarkUnknown => "mark-unknown",
            Self::Restart => "restart",
        }
    }
}

impl fmt::Display for StudyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| format!("unknown study command: {s}"))
    }
}
