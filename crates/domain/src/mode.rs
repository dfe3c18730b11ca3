//! Control mode: who decides whether the light is on.

use serde::{Deserialize, Serialize};

/// Which party drives the light switch.
///
/// In [`Auto`](Self::Auto) the evaluation loop compares each sensor reading
/// against the darkness threshold; in [`Manual`](Self::Manual) only explicit
/// operator commands touch the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Auto,
    Manual,
}

impl Mode {
    /// Map the boolean "auto enabled" flag used at the API boundary.
    #[must_use]
    pub fn from_auto_enabled(enabled: bool) -> Self {
        if enabled { Self::Auto } else { Self::Manual }
    }

    #[must_use]
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Manual => f.write_str("manual"),
        }
    }
}
