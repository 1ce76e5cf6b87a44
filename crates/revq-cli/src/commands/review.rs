use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use revq_core::entities::Aspect;
use revq_core::responses::AspectPrompt;
use revq_engine::{AnswerSheet, Presentation, Submission};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReviewArgs;
use crate::commands::shared::credentials::require_session;
use crate::commands::shared::parse::parse_ranges;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

const ACTIONS: [&str; 3] = ["Evaluate", "Skip", "Quit"];

/// Handle `revq review`.
///
/// Loops present -> action -> commit until the queue is exhausted or the
/// reviewer quits. With `--edit` the first round reopens that title; every
/// round after a commit goes back to the queue.
pub async fn handle(
    args: &ReviewArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if !ui::prefs().interactive {
        anyhow::bail!(
            "revq review needs an interactive terminal; use 'revq next' and 'revq submit' instead"
        );
    }

    let mut session = require_session(ctx, flags)?.with_ranges(parse_ranges(&args.ranges)?);
    if let Some(title) = &args.edit {
        session.resume(title.as_str());
    }

    let theme = ColorfulTheme::default();
    let mut committed = 0usize;
    loop {
        let Some(presentation) = ctx.service.present(&session, &mut rand::thread_rng())? else {
            println!("Queue exhausted for {}. Thanks!", session.reviewer.name);
            break;
        };
        print_presentation(&presentation);

        let action = Select::with_theme(&theme)
            .with_prompt("Action")
            .items(&ACTIONS)
            .default(0)
            .interact()?;
        let submission = match action {
            0 => Submission::Answers(ask_answers(
                &theme,
                ctx.service.aspects(),
                &presentation.aspects,
            )?),
            1 => Submission::Skip,
            _ => break,
        };

        match ctx
            .service
            .submit(&session, &presentation.article.title, &submission)
            .await
        {
            Ok(response) => {
                committed += 1;
                if !flags.quiet {
                    output(&response, flags.format)?;
                }
                session.queue();
            }
            Err(error) => {
                eprintln!("commit failed, nothing was saved: {error}");
            }
        }
    }

    tracing::info!(reviewer = session.reviewer_id(), committed, "review loop finished");
    Ok(())
}

fn print_presentation(presentation: &Presentation) {
    let article = &presentation.article;
    println!();
    match presentation.tier {
        Some(tier) => println!("[{tier}] {}", article.title),
        None => println!("[edit] {}", article.title),
    }
    if let Some(at) = &presentation.evaluated_at {
        println!("last evaluated: {at}");
    }
    for (name, value) in &article.attributes {
        println!("  {name}: {value}");
    }
    println!();
    println!("{}", article.abstract_text);
    println!();
}

fn ask_answers(
    theme: &ColorfulTheme,
    aspects: &[Aspect],
    prompts: &[AspectPrompt],
) -> anyhow::Result<AnswerSheet> {
    let mut values = Vec::with_capacity(aspects.len());
    for (aspect, prompt) in aspects.iter().zip(prompts) {
        let default = prompt
            .preselected
            .as_deref()
            .and_then(|value| aspect.option_index(value))
            .unwrap_or(0);
        let choice = Select::with_theme(theme)
            .with_prompt(format!("{}: {}", aspect.label, aspect.prompt))
            .items(aspect.options.as_slice())
            .default(default)
            .interact()?;
        values.push(aspect.options[choice].clone());
    }
    Ok(AnswerSheet::from_ordered(aspects, &values)?)
}
