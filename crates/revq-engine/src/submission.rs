//! Recording answers and skips into the ledger.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use revq_core::columns::ColumnKey;
use revq_core::entities::{Article, Aspect};
use revq_core::enums::EvaluationAction;

use crate::error::EngineError;
use crate::helpers::format_timestamp;
use crate::ledger::Ledger;

/// One chosen option per configured aspect, in aspect order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSheet {
    answers: Vec<String>,
}

impl AnswerSheet {
    /// Build from selections keyed by 1-based aspect position. Each value is
    /// an option's text or its 1-based index.
    ///
    /// # Errors
    ///
    /// - `EngineError::InvalidAnswer` for a position with no aspect or a
    ///   value that is not one of the aspect's options
    /// - `EngineError::IncompleteAnswers` listing aspects with no selection
    pub fn from_selections(
        aspects: &[Aspect],
        selections: &BTreeMap<usize, String>,
    ) -> Result<Self, EngineError> {
        if let Some((&position, value)) = selections
            .iter()
            .find(|(p, _)| **p == 0 || **p > aspects.len())
        {
            return Err(EngineError::InvalidAnswer {
                aspect: format!("#{position}"),
                value: value.clone(),
            });
        }

        let mut answers = Vec::with_capacity(aspects.len());
        let mut missing = Vec::new();
        for (idx, aspect) in aspects.iter().enumerate() {
            match selections.get(&(idx + 1)) {
                Some(raw) => {
                    let option = aspect.resolve(raw).ok_or_else(|| EngineError::InvalidAnswer {
                        aspect: aspect.label.clone(),
                        value: raw.clone(),
                    })?;
                    answers.push(option.to_string());
                }
                None => missing.push(aspect.label.clone()),
            }
        }
        if !missing.is_empty() {
            return Err(EngineError::IncompleteAnswers { aspects: missing });
        }
        Ok(Self { answers })
    }

    /// Build from one value per aspect, in order.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_selections`].
    pub fn from_ordered(aspects: &[Aspect], values: &[String]) -> Result<Self, EngineError> {
        let selections = values
            .iter()
            .enumerate()
            .map(|(i, v)| (i + 1, v.clone()))
            .collect();
        Self::from_selections(aspects, &selections)
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }
}

/// What the reviewer decided for an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Answers(AnswerSheet),
    Skip,
}

impl Submission {
    #[must_use]
    pub const fn action(&self) -> EvaluationAction {
        match self {
            Self::Answers(_) => EvaluationAction::Submitted,
            Self::Skip => EvaluationAction::Skipped,
        }
    }
}

/// Per-aspect values that [`record_at`] writes.
#[must_use]
pub fn written_values(aspects: &[Aspect], submission: &Submission, skip_marker: &str) -> Vec<String> {
    match submission {
        Submission::Answers(sheet) => sheet.answers().to_vec(),
        Submission::Skip => vec![skip_marker.to_string(); aspects.len()],
    }
}

/// Write a submission into `ledger` as of `now`.
///
/// Creates the row if the title has none. The reviewer's evaluation date is
/// set only if it is not already set; answer cells are always overwritten.
pub fn record_at(
    ledger: &mut Ledger,
    reviewer: &str,
    article: &Article,
    aspects: &[Aspect],
    submission: &Submission,
    skip_marker: &str,
    now: DateTime<Utc>,
) {
    let values = written_values(aspects, submission, skip_marker);
    for (aspect, value) in aspects.iter().zip(values) {
        ledger.set(
            &article.title,
            &article.abstract_text,
            ColumnKey::answer(reviewer, &aspect.label),
            value,
        );
    }

    let date_key = ColumnKey::evaluation_date(reviewer);
    if ledger.get(&article.title, &date_key).is_none() {
        ledger.set(&article.title, &article.abstract_text, date_key, format_timestamp(now));
    }
}

/// Copy of `ledger` with the submission recorded as of the current time.
#[must_use]
pub fn record(
    ledger: &Ledger,
    reviewer: &str,
    article: &Article,
    aspects: &[Aspect],
    submission: &Submission,
    skip_marker: &str,
) -> Ledger {
    let mut next = ledger.clone();
    record_at(&mut next, reviewer, article, aspects, submission, skip_marker, Utc::now());
    next
}
