use crate::cli::GlobalFlags;
use crate::cli::root_commands::CatalogArgs;
use crate::commands::shared::parse::parse_ranges;
use crate::context::AppContext;
use crate::output::output;

/// Handle `revq catalog`.
pub fn handle(args: &CatalogArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let ranges = parse_ranges(&args.ranges)?;
    output(&ctx.service.summary(&ranges), flags.format)
}
