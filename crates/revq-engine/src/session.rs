//! Per-reviewer session context.

use revq_core::entities::Reviewer;

use crate::filter::{AttributeRange, RangeFilter};

/// What the session presents next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionMode {
    /// Ask the selector for the next article.
    #[default]
    Queue,
    /// Reopen one earlier evaluation.
    Resume { title: String },
}

/// One authenticated reviewer's interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSession {
    pub reviewer: Reviewer,
    pub mode: SessionMode,
    pub ranges: RangeFilter,
}

impl ReviewSession {
    #[must_use]
    pub fn new(reviewer: Reviewer) -> Self {
        Self {
            reviewer,
            mode: SessionMode::Queue,
            ranges: RangeFilter::new(),
        }
    }

    #[must_use]
    pub fn with_ranges(mut self, ranges: RangeFilter) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn set_range(&mut self, attribute: impl Into<String>, range: AttributeRange) {
        self.ranges.insert(attribute.into(), range);
    }

    /// Switch to editing `title`.
    pub fn resume(&mut self, title: impl Into<String>) {
        self.mode = SessionMode::Resume {
            title: title.into(),
        };
    }

    /// Back to the queue.
    pub fn queue(&mut self) {
        self.mode = SessionMode::Queue;
    }

    #[must_use]
    pub fn reviewer_id(&self) -> &str {
        &self.reviewer.id
    }
}
