use revq_core::entities::Reviewer;
use revq_core::responses::{
    CatalogResponse, EditShowResponse, EditableListResponse, NextResponse, SubmitResponse,
};
use schemars::{Schema, schema_for};

use crate::cli::root_commands::SchemaArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

pub const TYPE_NAMES: [&str; 6] = [
    "next",
    "submit",
    "edit-list",
    "edit-show",
    "catalog",
    "reviewer",
];

/// Handle `revq schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_by_name(&args.type_name)?;
    let format = match flags.format {
        OutputFormat::Raw => OutputFormat::Raw,
        OutputFormat::Json | OutputFormat::Table => OutputFormat::Json,
    };
    output(&schema, format)
}

fn schema_by_name(type_name: &str) -> anyhow::Result<Schema> {
    let schema = match type_name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "next" => schema_for!(NextResponse),
        "submit" | "skip" => schema_for!(SubmitResponse),
        "edit-list" => schema_for!(EditableListResponse),
        "edit-show" => schema_for!(EditShowResponse),
        "catalog" => schema_for!(CatalogResponse),
        "reviewer" | "whoami" => schema_for!(Reviewer),
        _ => anyhow::bail!(
            "unknown schema type '{type_name}'; expected one of: {}",
            TYPE_NAMES.join(", ")
        ),
    };
    Ok(schema)
}
