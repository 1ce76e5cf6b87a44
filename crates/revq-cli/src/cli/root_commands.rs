use clap::{Args, Subcommand};

use crate::cli::subcommands::EditCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Authenticate and show the reviewer.
    Whoami,
    /// Show the next article to evaluate.
    Next(NextArgs),
    /// Record answers for an article.
    Submit(SubmitArgs),
    /// Mark every aspect of an article as skipped.
    Skip(SkipArgs),
    /// Revisit earlier evaluations.
    Edit {
        #[command(subcommand)]
        action: EditCommands,
    },
    /// Catalog size and attribute bounds.
    Catalog(CatalogArgs),
    /// Interactive review loop.
    Review(ReviewArgs),
    /// Print the JSON schema of a response type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct NextArgs {
    /// Attribute range, inclusive. Either bound may be omitted.
    #[arg(long = "range", value_name = "ATTR=MIN:MAX")]
    pub ranges: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SubmitArgs {
    #[arg(long)]
    pub title: String,
    /// Answer for aspect N: an option's 1-based index or its exact text.
    #[arg(long = "answer", value_name = "N=OPTION", required = true)]
    pub answers: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SkipArgs {
    #[arg(long)]
    pub title: String,
}

#[derive(Clone, Debug, Args)]
pub struct CatalogArgs {
    #[arg(long = "range", value_name = "ATTR=MIN:MAX")]
    pub ranges: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ReviewArgs {
    #[arg(long = "range", value_name = "ATTR=MIN:MAX")]
    pub ranges: Vec<String>,
    /// Start by editing this title instead of taking the next one.
    #[arg(long)]
    pub edit: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// One of: next, submit, edit-list, edit-show, catalog, reviewer
    pub type_name: String,
}
