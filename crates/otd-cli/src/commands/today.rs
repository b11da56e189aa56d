use otd_core::selector::QueryDate;

use crate::cli::GlobalFlags;
use crate::commands::query::run_and_print;
use crate::context::AppContext;

/// Handle `otd today`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    run_and_print(ctx.session.as_ref(), QueryDate::today(), flags).await
}
