use crate::cli::GlobalFlags;
use crate::commands::shared::credentials::require_session;
use crate::context::AppContext;
use crate::output::output;

/// Handle `revq whoami`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = require_session(ctx, flags)?;
    output(&session.reviewer, flags.format)
}
