#[path = "edit/list.rs"]
mod list;
#[path = "edit/show.rs"]
mod show;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EditCommands;
use crate::context::AppContext;

/// Handle `revq edit`.
pub fn handle(action: &EditCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        EditCommands::List { skipped, day } => list::run(*skipped, day.as_deref(), ctx, flags),
        EditCommands::Show { title } => show::run(title, ctx, flags),
    }
}
