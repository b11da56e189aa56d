use otd_core::responses::{QueryReport, QueryState};
use otd_core::selector::QueryDate;
use otd_core::session::{QueryOutcome, QuerySession};
use otd_core::source::{Captioner, PhotoSource};

use crate::cli::GlobalFlags;
use crate::output;
use crate::progress::Progress;

/// Run one query with a spinner and return its report.
///
/// `None` when a later query superseded this one.
pub async fn run_query<S, C>(session: &QuerySession<S, C>, query: QueryDate) -> Option<QueryReport>
where
    S: PhotoSource,
    C: Captioner,
{
    let spinner = Progress::spinner(&format!("Foto's zoeken voor {query}"));
    match session.run(query).await {
        QueryOutcome::Completed(state) => {
            if matches!(state, QueryState::Error { .. }) {
                spinner.finish_err("Ophalen mislukt");
            } else {
                spinner.finish_clear();
            }
            Some(QueryReport::new(query, state))
        }
        QueryOutcome::Superseded { sequence, latest } => {
            spinner.finish_clear();
            tracing::debug!(sequence, latest, %query, "query superseded");
            None
        }
    }
}

/// Run a single query, print its report, and fail when it ended in error.
pub async fn run_and_print<S, C>(
    session: &QuerySession<S, C>,
    query: QueryDate,
    flags: &GlobalFlags,
) -> anyhow::Result<()>
where
    S: PhotoSource,
    C: Captioner,
{
    let Some(report) = run_query(session, query).await else {
        return Ok(());
    };
    output::output_report(&report, flags.format)?;
    if matches!(report.state, QueryState::Error { .. }) {
        anyhow::bail!("query for {query} failed; rerun with --verbose for the cause");
    }
    Ok(())
}
