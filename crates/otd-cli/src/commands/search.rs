use anyhow::Context;
use otd_core::selector::QueryDate;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::commands::query::run_and_print;
use crate::context::AppContext;

/// Handle `otd search`.
pub async fn handle(
    args: &SearchArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let query = QueryDate::new(args.month, args.day)
        .with_context(|| format!("invalid day {} for month {}", args.day, args.month))?;
    run_and_print(ctx.session.as_ref(), query, flags).await
}
