//! Revisiting earlier evaluations.

use chrono::NaiveDate;
use revq_core::columns::{ColumnKey, ReviewerField};
use revq_core::entities::Aspect;
use revq_core::responses::AspectPrompt;

use crate::helpers::parse_timestamp;
use crate::ledger::Ledger;

/// Which of a reviewer's evaluations to list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditableFilter {
    /// Only rows where at least one answer is the skip marker.
    pub skipped_only: bool,
    /// Only rows whose evaluation date falls on this UTC day.
    pub day: Option<NaiveDate>,
}

/// Titles `reviewer` has answered or skipped, in results-table order.
///
/// With a day filter, rows whose timestamp is missing or unparseable are
/// left out.
#[must_use]
pub fn list_editable(
    ledger: &Ledger,
    reviewer: &str,
    filter: &EditableFilter,
    skip_marker: &str,
) -> Vec<String> {
    let mut titles: Vec<String> = Vec::new();
    for row in ledger.rows() {
        let Some(title) = row.title() else { continue };
        if !row.has_entry_by(reviewer) || titles.iter().any(|t| t == title) {
            continue;
        }
        if filter.skipped_only
            && !row
                .reviewer_fields(reviewer)
                .any(|(field, value)| matches!(field, ReviewerField::Answer(_)) && value == skip_marker)
        {
            continue;
        }
        if let Some(day) = filter.day {
            let stamp = row.get(&ColumnKey::evaluation_date(reviewer));
            match stamp.and_then(parse_timestamp) {
                Some(at) if at.date_naive() == day => {}
                Some(_) => continue,
                None => {
                    tracing::warn!(%title, reviewer, raw = ?stamp, "unparseable evaluation date");
                    continue;
                }
            }
        }
        titles.push(title.to_string());
    }
    titles
}

/// Aspect prompts with the reviewer's stored answers for `title` filled in.
///
/// A stored value that is no longer one of the aspect's options (including
/// the skip marker) is reported as `stored` but not preselected.
#[must_use]
pub fn prefill(ledger: &Ledger, reviewer: &str, title: &str, aspects: &[Aspect]) -> Vec<AspectPrompt> {
    aspects
        .iter()
        .enumerate()
        .map(|(idx, aspect)| {
            let stored = ledger
                .get(title, &ColumnKey::answer(reviewer, &aspect.label))
                .map(str::to_string);
            let preselected = stored
                .as_deref()
                .filter(|v| aspect.option_index(v).is_some())
                .map(str::to_string);
            AspectPrompt {
                index: idx + 1,
                label: aspect.label.clone(),
                prompt: aspect.prompt.clone(),
                options: aspect.options.clone(),
                stored,
                preselected,
            }
        })
        .collect()
}

/// Prompts with nothing filled in.
#[must_use]
pub fn blank_prompts(aspects: &[Aspect]) -> Vec<AspectPrompt> {
    prefill(&Ledger::default(), "", "", aspects)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use revq_core::entities::Article;

    use super::*;
    use crate::submission::{AnswerSheet, Submission, record_at};

    fn aspects() -> Vec<Aspect> {
        vec![
            Aspect::new("Aspect 1", "Relevance?", &["Low", "Mid", "High"]),
            Aspect::new("Aspect 2", "Clarity?", &["Low", "Mid", "High"]),
        ]
    }

    fn ledger() -> Ledger {
        let mut ledger = Ledger::default();
        let answers = Submission::Answers(
            AnswerSheet::from_ordered(&aspects(), &["High".to_string(), "Low".to_string()]).unwrap(),
        );
        let day1 = Utc.with_ymd_and_hms(2026, 10, 17, 23, 59, 0).unwrap();
        let day2 = Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap();
        record_at(&mut ledger, "r1", &Article::new("A", ""), &aspects(), &answers, "SKIPPED", day1);
        record_at(&mut ledger, "r1", &Article::new("B", ""), &aspects(), &Submission::Skip, "SKIPPED", day2);
        record_at(&mut ledger, "r2", &Article::new("C", ""), &aspects(), &answers, "SKIPPED", day2);
        ledger
    }

    #[test]
    fn lists_only_own_rows() {
        let titles = list_editable(&ledger(), "r1", &EditableFilter::default(), "SKIPPED");
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn skipped_only() {
        let filter = EditableFilter {
            skipped_only: true,
            day: None,
        };
        assert_eq!(list_editable(&ledger(), "r1", &filter, "SKIPPED"), vec!["B"]);
    }

    #[test]
    fn day_filter_uses_utc_date() {
        let filter = EditableFilter {
            skipped_only: false,
            day: NaiveDate::from_ymd_opt(2026, 10, 17),
        };
        assert_eq!(list_editable(&ledger(), "r1", &filter, "SKIPPED"), vec!["A"]);
    }

    #[test]
    fn unparseable_timestamps_are_excluded_by_day_filter() {
        let mut ledger = ledger();
        ledger.set("A", "", ColumnKey::evaluation_date("r1"), "yesterday".to_string());
        let filter = EditableFilter {
            skipped_only: false,
            day: NaiveDate::from_ymd_opt(2026, 10, 17),
        };
        assert!(list_editable(&ledger, "r1", &filter, "SKIPPED").is_empty());
        assert_eq!(
            list_editable(&ledger, "r1", &EditableFilter::default(), "SKIPPED"),
            vec!["A", "B"]
        );
    }

    #[test]
    fn prefill_maps_unknown_values_to_no_preselection() {
        let mut ledger = ledger();
        ledger.set("A", "", ColumnKey::answer("r1", "Aspect 2"), "Very low".to_string());

        let prompts = prefill(&ledger, "r1", "A", &aspects());
        assert_eq!(prompts[0].preselected.as_deref(), Some("High"));
        assert_eq!(prompts[1].stored.as_deref(), Some("Very low"));
        assert_eq!(prompts[1].preselected, None);

        let skipped = prefill(&ledger, "r1", "B", &aspects());
        assert_eq!(skipped[0].stored.as_deref(), Some("SKIPPED"));
        assert_eq!(skipped[0].preselected, None);
    }

    #[test]
    fn blank_prompts_number_from_one() {
        let prompts = blank_prompts(&aspects());
        assert_eq!(prompts.iter().map(|p| p.index).collect::<Vec<_>>(), vec![1, 2]);
        assert!(prompts.iter().all(|p| p.stored.is_none()));
    }
}
