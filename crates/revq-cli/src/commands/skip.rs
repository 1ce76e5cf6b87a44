use revq_engine::Submission;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SkipArgs;
use crate::commands::shared::credentials::require_session;
use crate::context::AppContext;
use crate::output::output;

/// Handle `revq skip`.
pub async fn handle(args: &SkipArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = require_session(ctx, flags)?;
    let response = ctx
        .service
        .submit(&session, &args.title, &Submission::Skip)
        .await?;
    output(&response, flags.format)
}
