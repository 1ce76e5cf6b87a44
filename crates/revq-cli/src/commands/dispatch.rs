use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Whoami => commands::whoami::handle(ctx, flags),
        Commands::Next(args) => commands::next::handle(&args, ctx, flags),
        Commands::Submit(args) => commands::submit::handle(&args, ctx, flags).await,
        Commands::Skip(args) => commands::skip::handle(&args, ctx, flags).await,
        Commands::Edit { action } => commands::edit::handle(&action, ctx, flags),
        Commands::Catalog(args) => commands::catalog::handle(&args, ctx, flags),
        Commands::Review(args) => commands::review::handle(&args, ctx, flags).await,
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
