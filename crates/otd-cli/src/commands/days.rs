use otd_core::date::month_name;
use otd_core::responses::DayOptionsResponse;
use otd_core::selector::{DaySelector, QueryDate};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DaysArgs;
use crate::output;

/// Handle `otd days`.
pub fn handle(args: &DaysArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output::output(&day_options(args.month)?, flags.format)
}

fn day_options(month: u32) -> anyhow::Result<DayOptionsResponse> {
    let selector = DaySelector::at(QueryDate::new(month, 1)?);
    Ok(DayOptionsResponse {
        month,
        month_name: month_name(month).unwrap_or_default().to_string(),
        days: selector.day_options(),
    })
}
