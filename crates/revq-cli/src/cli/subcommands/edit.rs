use clap::Subcommand;

/// Edit/resume commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EditCommands {
    /// List titles you have answered or skipped.
    List {
        /// Only articles with at least one skipped aspect.
        #[arg(long)]
        skipped: bool,
        /// Only articles first evaluated on this UTC day (YYYY-MM-DD).
        #[arg(long)]
        day: Option<String>,
    },
    /// Show one article with your stored answers pre-selected.
    Show {
        #[arg(long)]
        title: String,
    },
}
