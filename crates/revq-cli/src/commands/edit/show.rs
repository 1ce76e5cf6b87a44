use anyhow::Context;
use revq_core::responses::EditShowResponse;

use crate::cli::GlobalFlags;
use crate::commands::shared::credentials::require_session;
use crate::context::AppContext;
use crate::output::output;

pub fn run(title: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut session = require_session(ctx, flags)?;
    session.resume(title);

    let presentation = ctx
        .service
        .present(&session, &mut rand::thread_rng())?
        .with_context(|| format!("nothing to show for '{title}'"))?;

    output(
        &EditShowResponse {
            article: presentation.article,
            evaluated_at: presentation.evaluated_at,
            aspects: presentation.aspects,
        },
        flags.format,
    )
}
