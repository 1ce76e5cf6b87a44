use anyhow::Context;
use revq_engine::ReviewSession;

use crate::cli::GlobalFlags;
use crate::context::AppContext;

/// Authenticate the reviewer named by the global flags and open a session.
pub fn require_session(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<ReviewSession> {
    let (Some(id), Some(name)) = (flags.reviewer.as_deref(), flags.name.as_deref()) else {
        anyhow::bail!(
            "reviewer credentials required: pass --reviewer/--name or set REVQ_REVIEWER_ID/REVQ_REVIEWER_NAME"
        );
    };

    ctx.service
        .authenticate(id, name)
        .with_context(|| format!("login failed for reviewer '{id}'"))
}
