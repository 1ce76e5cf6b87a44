//! Results-table column naming.
//!
//! The results table has no fixed schema beyond `Title` and `Abstract`.
//! Every other column belongs to one reviewer and is named
//! `<reviewer id>/<aspect label>` or `<reviewer id>/EvaluationDate`.

use std::fmt;

/// Primary key column of both the catalog and the results table.
pub const TITLE_COLUMN: &str = "Title";

pub const ABSTRACT_COLUMN: &str = "Abstract";

/// Suffix of the per-reviewer timestamp column.
pub const EVALUATION_DATE_FIELD: &str = "EvaluationDate";

/// Default marker written to every aspect when a reviewer skips an article.
pub const DEFAULT_SKIP_MARKER: &str = "SKIPPED";

/// Separator between reviewer id and field name in a column header.
pub const REVIEWER_SEPARATOR: char = '/';

/// The per-reviewer part of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReviewerField {
    /// Answer to the aspect with this label.
    Answer(String),
    EvaluationDate,
}

/// A parsed results-table header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnKey {
    Title,
    Abstract,
    Reviewer {
        reviewer: String,
        field: ReviewerField,
    },
    /// Any column the engine does not own. Preserved verbatim.
    Other(String),
}

impl ColumnKey {
    /// Parse a header. Never fails: unrecognised headers become `Other`.
    #[must_use]
    pub fn parse(header: &str) -> Self {
        match header {
            TITLE_COLUMN => return Self::Title,
            ABSTRACT_COLUMN => return Self::Abstract,
            _ => {}
        }
        match header.split_once(REVIEWER_SEPARATOR) {
            Some((reviewer, field)) if !reviewer.is_empty() && !field.is_empty() => {
                let field = if field == EVALUATION_DATE_FIELD {
                    ReviewerField::EvaluationDate
                } else {
                    ReviewerField::Answer(field.to_string())
                };
                Self::Reviewer {
                    reviewer: reviewer.to_string(),
                    field,
                }
            }
            _ => Self::Other(header.to_string()),
        }
    }

    #[must_use]
    pub fn answer(reviewer: &str, label: &str) -> Self {
        Self::Reviewer {
            reviewer: reviewer.to_string(),
            field: ReviewerField::Answer(label.to_string()),
        }
    }

    #[must_use]
    pub fn evaluation_date(reviewer: &str) -> Self {
        Self::Reviewer {
            reviewer: reviewer.to_string(),
            field: ReviewerField::EvaluationDate,
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str(TITLE_COLUMN),
            Self::Abstract => f.write_str(ABSTRACT_COLUMN),
            Self::Reviewer { reviewer, field } => match field {
                ReviewerField::Answer(label) => write!(f, "{reviewer}{REVIEWER_SEPARATOR}{label}"),
                ReviewerField::EvaluationDate => {
                    write!(f, "{reviewer}{REVIEWER_SEPARATOR}{EVALUATION_DATE_FIELD}")
                }
            },
            Self::Other(header) => f.write_str(header),
        }
    }
}
