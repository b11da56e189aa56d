use clap::{Args, Subcommand};
use otd_core::selector::parse_month;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// What happened on a given day and month, any year.
    Search(SearchArgs),
    /// What happened on today's day and month.
    Today,
    /// Days selectable in a month (29 February included).
    Days(DaysArgs),
    /// The twelve month names.
    Months,
    /// Interactive session on stdin that keeps the photo catalog loaded.
    Browse,
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Day of the month.
    #[arg(short, long)]
    pub day: u32,
    /// Month as a Dutch name (`maart`) or a number (`3`).
    #[arg(short, long, value_parser = month_arg)]
    pub month: u32,
}

#[derive(Clone, Debug, Args)]
pub struct DaysArgs {
    /// Month as a Dutch name or a number.
    #[arg(short, long, value_parser = month_arg)]
    pub month: u32,
}

fn month_arg(raw: &str) -> Result<u32, String> {
    parse_month(raw).map_err(|e| e.to_string())
}
