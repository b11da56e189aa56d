//! Query lifecycle phases.
//!
//! ```text
//! idle → loading → error
//!                → no_results
//!                → results
//! error | no_results | results → loading
//! ```
//!
//! Every new date selection re-enters `loading`; there are no other
//! observable intermediate phases.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryPhase {
    Idle,
    Loading,
    Error,
    NoResults,
    Results,
}

impl QueryPhase {
    /// Phases reachable from this one.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle | Self::Error | Self::NoResults | Self::Results => &[Self::Loading],
            Self::Loading => &[Self::Error, Self::NoResults, Self::Results, Self::Loading],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Error => "error",
            Self::NoResults => "no_results",
            Self::Results => "results",
        }
    }
}

impl fmt::Display for QueryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
