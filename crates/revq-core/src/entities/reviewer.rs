use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An authenticated reviewer.
///
/// `id` is the opaque credential id used in results-table column names;
/// `name` is the display name from the registry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct Reviewer {
    pub id: String,
    pub name: String,
}
