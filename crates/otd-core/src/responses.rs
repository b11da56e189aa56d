//! Query states and the report shape returned by `otd` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::DisplayEvent;
use crate::enums::QueryPhase;
use crate::selector::QueryDate;

/// Generic user-facing failure message. The cause is only logged.
pub const ERROR_MESSAGE: &str =
    "Er is een fout opgetreden bij het ophalen van de gegevens. Probeer het later opnieuw.";

/// Empty-state motto shown when no photo matches the day.
pub const NO_RESULTS_MOTTO: &str = "\"Geen woorden en geen daden!\"";

/// Empty-state explanation shown under the motto.
pub const NO_RESULTS_MESSAGE: &str =
    "Voor deze datum zijn geen foto's gevonden in het Nationaal Archief.";

/// Observable state of the query lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QueryState {
    Idle,
    Loading,
    Error { message: String },
    NoResults,
    Results { events: Vec<DisplayEvent> },
}

impl QueryState {
    #[must_use]
    pub const fn phase(&self) -> QueryPhase {
        match self {
            Self::Idle => QueryPhase::Idle,
            Self::Loading => QueryPhase::Loading,
            Self::Error { .. } => QueryPhase::Error,
            Self::NoResults => QueryPhase::NoResults,
            Self::Results { .. } => QueryPhase::Results,
        }
    }

    /// The generic error state.
    #[must_use]
    pub fn error() -> Self {
        Self::Error {
            message: ERROR_MESSAGE.to_string(),
        }
    }
}

/// Heading shown above the results for a day.
#[must_use]
pub fn results_title(query: QueryDate) -> String {
    format!("Wat deed Feyenoord in de geschiedenis op {query}?")
}

/// Response from `otd search` and `otd today`.
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq, Eq)]
pub struct QueryReport {
    pub query: QueryDate,
    pub label: String,
    pub title: String,
    pub message: Option<String>,
    #[serde(flatten)]
    pub state: QueryState,
}

impl QueryReport {
    #[must_use]
    pub fn new(query: QueryDate, state: QueryState) -> Self {
        let message = match &state {
            QueryState::NoResults => Some(format!("{NO_RESULTS_MOTTO} {NO_RESULTS_MESSAGE}")),
            QueryState::Error { message } => Some(message.clone()),
            _ => None,
        };
        Self {
            query,
            label: query.to_string(),
            title: results_title(query),
            message,
            state,
        }
    }
}

/// Response from `otd days`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DayOptionsResponse {
    pub month: u32,
    pub month_name: String,
    pub days: Vec<u32>,
}

/// One entry of `otd months`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MonthOption {
    pub number: u32,
    pub name: String,
}
