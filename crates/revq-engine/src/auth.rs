//! Static reviewer registry and login.

use std::collections::BTreeMap;

use revq_core::entities::Reviewer;

use crate::error::EngineError;

/// Credential id -> display name. Fixed for the life of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewerRegistry {
    reviewers: BTreeMap<String, String>,
}

impl ReviewerRegistry {
    #[must_use]
    pub const fn new(reviewers: BTreeMap<String, String>) -> Self {
        Self { reviewers }
    }

    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
        )
    }

    /// Log a reviewer in. The id must be registered and `name` must equal its
    /// display name ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidCredentials` otherwise.
    pub fn authenticate(&self, id: &str, name: &str) -> Result<Reviewer, EngineError> {
        match self.reviewers.get(id) {
            Some(expected) if expected.to_lowercase() == name.to_lowercase() => {
                tracing::debug!(reviewer = id, "authenticated");
                Ok(Reviewer {
                    id: id.to_string(),
                    name: expected.clone(),
                })
            }
            _ => Err(EngineError::InvalidCredentials { id: id.to_string() }),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.reviewers.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reviewers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviewers.is_empty()
    }
}
