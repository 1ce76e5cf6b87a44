use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SortDirection;

/// One fallback sort key: a numeric catalog attribute and its direction.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OrderingKey {
    pub attribute: String,
    pub direction: SortDirection,
}

impl OrderingKey {
    #[must_use]
    pub fn asc(attribute: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn desc(attribute: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
            direction: SortDirection::Desc,
        }
    }
}
