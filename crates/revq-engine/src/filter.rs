//! Range filters over ordering attributes.

use std::collections::BTreeMap;

use crate::catalog::Catalog;

/// Inclusive `[min, max]` bound on one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRange {
    pub min: u64,
    pub max: u64,
}

impl AttributeRange {
    #[must_use]
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Range covering every value.
    #[must_use]
    pub const fn full() -> Self {
        Self::new(0, u64::MAX)
    }

    #[must_use]
    pub const fn contains(&self, value: u64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Attribute name -> range. Every range must hold for an article to pass.
pub type RangeFilter = BTreeMap<String, AttributeRange>;

impl Catalog {
    /// Articles whose attributes fall inside every range.
    ///
    /// Ranges on attributes the catalog does not carry are ignored. A range
    /// with `min > max` matches nothing. The catalog itself is untouched.
    #[must_use]
    pub fn filter(&self, ranges: &RangeFilter) -> Self {
        let active: Vec<(&str, AttributeRange)> = ranges
            .iter()
            .filter(|(attr, _)| {
                let known = self.attributes().iter().any(|a| a == *attr);
                if !known {
                    tracing::warn!(attribute = %attr, "ignoring range on unknown attribute");
                }
                known
            })
            .map(|(attr, range)| (attr.as_str(), *range))
            .collect();

        if active.is_empty() {
            return self.clone();
        }
        self.retain(|article| {
            active
                .iter()
                .all(|(attr, range)| range.contains(article.attribute(attr).unwrap_or(0)))
        })
    }
}
