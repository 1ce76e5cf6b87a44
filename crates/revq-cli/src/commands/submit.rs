use revq_engine::{AnswerSheet, Submission};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SubmitArgs;
use crate::commands::shared::credentials::require_session;
use crate::commands::shared::parse::parse_answers;
use crate::context::AppContext;
use crate::output::output;

/// Handle `revq submit`.
pub async fn handle(
    args: &SubmitArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = require_session(ctx, flags)?;
    let selections = parse_answers(&args.answers)?;
    let sheet = AnswerSheet::from_selections(ctx.service.aspects(), &selections)?;

    let response = ctx
        .service
        .submit(&session, &args.title, &Submission::Answers(sheet))
        .await?;
    output(&response, flags.format)
}
