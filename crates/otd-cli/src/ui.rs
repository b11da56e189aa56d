//! Terminal capabilities, resolved once per process.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

/// Narrowest `COLUMNS` value honoured for table layout.
const MIN_TERM_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    /// Colour result states in table output.
    pub color: bool,
    /// Show a spinner while a query runs.
    pub spinner: bool,
    pub width: Option<usize>,
}

impl UiPrefs {
    fn detect(
        flags: &GlobalFlags,
        stdout_is_tty: bool,
        columns: Option<&str>,
        no_color: bool,
    ) -> Self {
        let human = stdout_is_tty && !flags.quiet && flags.format == OutputFormat::Table;
        Self {
            color: human && !no_color,
            spinner: human,
            width: columns
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|width| *width >= MIN_TERM_WIDTH),
        }
    }
}

static PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let columns = std::env::var("COLUMNS").ok();
    let prefs = UiPrefs::detect(
        flags,
        std::io::stdout().is_terminal(),
        columns.as_deref(),
        std::env::var_os("NO_COLOR").is_some(),
    );
    let _ = PREFS.set(prefs);
}

/// Preferences set by [`init`]; plain output before that.
#[must_use]
pub fn prefs() -> UiPrefs {
    PREFS.get().copied().unwrap_or_default()
}
