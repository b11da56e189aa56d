use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Handle commands that need neither network clients nor a session.
///
/// Returns `None` for commands that must go through [`dispatch`].
pub fn dispatch_offline(command: &Commands, flags: &GlobalFlags) -> Option<anyhow::Result<()>> {
    match command {
        Commands::Days(args) => Some(commands::days::handle(args, flags)),
        Commands::Months => Some(commands::months::handle(flags)),
        Commands::Search(_) | Commands::Today | Commands::Browse => None,
    }
}

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Search(args) => commands::search::handle(&args, &ctx, flags).await,
        Commands::Today => commands::today::handle(&ctx, flags).await,
        Commands::Browse => commands::browse::handle(&ctx, flags).await,
        Commands::Days(_) | Commands::Months => {
            unreachable!("days/months are pre-dispatched in main")
        }
    }
}
