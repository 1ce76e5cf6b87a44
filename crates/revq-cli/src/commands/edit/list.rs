use revq_core::responses::EditableListResponse;
use revq_engine::EditableFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::credentials::require_session;
use crate::commands::shared::parse::parse_day;
use crate::context::AppContext;
use crate::output::output;

pub fn run(
    skipped: bool,
    day: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = require_session(ctx, flags)?;
    let filter = EditableFilter {
        skipped_only: skipped,
        day: day.map(parse_day).transpose()?,
    };

    let mut titles = ctx.service.editable(&session, &filter);
    if let Some(limit) = flags.limit {
        titles.truncate(usize::try_from(limit)?);
    }

    output(
        &EditableListResponse {
            reviewer_id: session.reviewer.id,
            skipped_only: filter.skipped_only,
            day: filter.day,
            titles,
        },
        flags.format,
    )
}
