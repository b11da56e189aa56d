//! `otd browse`: a day picker on stdin.
//!
//! Each query runs as its own task so a new date can be picked while an
//! older query is still loading. Only the most recently started query
//! reports; the session discards the rest.

use std::sync::Arc;

use otd_core::responses::QueryReport;
use otd_core::selector::{DaySelector, QueryDate, parse_month};
use otd_core::session::{QueryOutcome, QuerySession};
use otd_core::source::{Captioner, PhotoSource};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output;

const HELP: &str = "\
Opdrachten:
  <dag> <maand>   kies een datum en zoek (bijv. 15 maart of 15 3)
  dag <n>         kies een dag in de huidige maand
  maand <m>       kies een maand (de dag wordt zo nodig ingekort)
  zoek            zoek op de gekozen datum
  vandaag         spring naar vandaag en zoek
  ververs         laad de fotocatalogus opnieuw bij de volgende zoekopdracht
  stop            afsluiten";

/// One line of browse input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    Pick { day: u32, month: u32 },
    Day(u32),
    Month(u32),
    Search,
    Today,
    Refresh,
    Help,
    Stop,
    Empty,
}

/// Parse one input line.
///
/// # Errors
///
/// Returns a user-facing message for anything unrecognized.
pub fn parse_command(line: &str) -> Result<BrowseCommand, String> {
    let words: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();
    let words: Vec<&str> = words.iter().map(String::as_str).collect();

    match words.as_slice() {
        [] => Ok(BrowseCommand::Empty),
        ["stop" | "exit" | "quit"] => Ok(BrowseCommand::Stop),
        ["vandaag"] => Ok(BrowseCommand::Today),
        ["ververs"] => Ok(BrowseCommand::Refresh),
        ["zoek"] => Ok(BrowseCommand::Search),
        ["help" | "?"] => Ok(BrowseCommand::Help),
        ["dag", day] => parse_day(day).map(BrowseCommand::Day),
        ["maand", month] => month_word(month).map(BrowseCommand::Month),
        [day, month] => Ok(BrowseCommand::Pick {
            day: parse_day(day)?,
            month: month_word(month)?,
        }),
        _ => Err(format!("onbekende opdracht: '{}' (typ 'help')", line.trim())),
    }
}

fn parse_day(raw: &str) -> Result<u32, String> {
    raw.parse::<u32>()
        .map_err(|_| format!("'{raw}' is geen dag"))
}

fn month_word(raw: &str) -> Result<u32, String> {
    parse_month(raw).map_err(|_| format!("'{raw}' is geen maand"))
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Stop,
}

/// Selector state plus the queries still in flight.
struct Browser<S, C> {
    session: Arc<QuerySession<S, C>>,
    selector: DaySelector,
    in_flight: JoinSet<(QueryDate, QueryOutcome)>,
}

impl<S, C> Browser<S, C>
where
    S: PhotoSource + 'static,
    C: Captioner + 'static,
{
    fn new(session: Arc<QuerySession<S, C>>, selector: DaySelector) -> Self {
        Self {
            session,
            selector,
            in_flight: JoinSet::new(),
        }
    }

    async fn apply(&mut self, command: BrowseCommand) -> Result<Step, String> {
        match command {
            BrowseCommand::Pick { day, month } => {
                let query = QueryDate::new(month, day).map_err(|e| e.to_string())?;
                self.selector = DaySelector::at(query);
                self.start(query);
            }
            BrowseCommand::Day(day) => {
                self.selector.set_day(day).map_err(|e| e.to_string())?;
                eprintln!("gekozen: {}", self.selector.query());
            }
            BrowseCommand::Month(month) => {
                self.selector.set_month(month).map_err(|e| e.to_string())?;
                eprintln!("gekozen: {}", self.selector.query());
            }
            BrowseCommand::Search => self.start(self.selector.query()),
            BrowseCommand::Today => {
                let query = self.selector.reset_to_today();
                self.start(query);
            }
            BrowseCommand::Refresh => {
                self.session.invalidate().await;
                eprintln!("fotocatalogus wordt opnieuw geladen bij de volgende zoekopdracht");
            }
            BrowseCommand::Help => eprintln!("{HELP}"),
            BrowseCommand::Stop => return Ok(Step::Stop),
            BrowseCommand::Empty => {}
        }
        Ok(Step::Continue)
    }

    fn start(&mut self, query: QueryDate) {
        let session = Arc::clone(&self.session);
        self.in_flight
            .spawn(async move { (query, session.run(query).await) });
    }
}

/// Drive a browse session from `reader`, handing every published report to `emit`.
pub async fn browse<R, S, C, F>(
    session: Arc<QuerySession<S, C>>,
    selector: DaySelector,
    reader: R,
    mut emit: F,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    S: PhotoSource + 'static,
    C: Captioner + 'static,
    F: FnMut(QueryReport) -> anyhow::Result<()>,
{
    let mut browser = Browser::new(session, selector);
    let mut lines = reader.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(command) => match browser.apply(command).await {
                        Ok(Step::Stop) => break,
                        Ok(Step::Continue) => {}
                        Err(message) => eprintln!("{message}"),
                    },
                    Err(message) => eprintln!("{message}"),
                }
            }
            Some(done) = browser.in_flight.join_next(), if !browser.in_flight.is_empty() => {
                publish(done?, &mut emit)?;
            }
        }
    }

    while let Some(done) = browser.in_flight.join_next().await {
        publish(done?, &mut emit)?;
    }
    Ok(())
}

fn publish<F>((query, outcome): (QueryDate, QueryOutcome), emit: &mut F) -> anyhow::Result<()>
where
    F: FnMut(QueryReport) -> anyhow::Result<()>,
{
    match outcome {
        QueryOutcome::Completed(state) => emit(QueryReport::new(query, state)),
        QueryOutcome::Superseded { sequence, latest } => {
            tracing::debug!(sequence, latest, %query, "browse query superseded");
            Ok(())
        }
    }
}

/// Handle `otd browse`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !flags.quiet {
        eprintln!("{HELP}");
    }
    let format = flags.format;
    browse(
        Arc::clone(&ctx.session),
        DaySelector::today(),
        BufReader::new(tokio::io::stdin()),
        |report| output::output_report(&report, format),
    )
    .await
}
