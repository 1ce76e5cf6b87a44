use revq_core::responses::NextResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::NextArgs;
use crate::commands::shared::credentials::require_session;
use crate::commands::shared::parse::parse_ranges;
use crate::context::AppContext;
use crate::output::output;

/// Handle `revq next`.
pub fn handle(args: &NextArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = require_session(ctx, flags)?.with_ranges(parse_ranges(&args.ranges)?);
    let presentation = ctx.service.present(&session, &mut rand::thread_rng())?;

    let response = match presentation {
        Some(presentation) => NextResponse {
            reviewer: session.reviewer,
            tier: presentation.tier,
            article: Some(presentation.article),
            aspects: presentation.aspects,
            message: None,
        },
        None => NextResponse {
            reviewer: session.reviewer,
            tier: None,
            article: None,
            aspects: Vec::new(),
            message: Some(String::from(
                "queue exhausted: no unreviewed articles match the current ranges",
            )),
        },
    };
    output(&response, flags.format)
}
