//! Next-article selection.
//!
//! Two tiers, tried in order:
//! 1. **Priority**: articles another registered reviewer has already
//!    answered or skipped, that this reviewer has not. One is chosen
//!    uniformly at random so concurrent reviewers spread out.
//! 2. **Fallback**: articles with no results row at all, sorted by the
//!    configured ordering keys. The first one wins.
//!
//! Both tiers draw candidates from the (possibly filtered) catalog. Who has
//! reviewed what is always read from the full ledger.

use std::cmp::Ordering;

use rand::Rng;
use rand::seq::SliceRandom;
use revq_core::entities::{Article, OrderingKey};
use revq_core::enums::{SortDirection, Tier};

use crate::auth::ReviewerRegistry;
use crate::catalog::Catalog;
use crate::ledger::Ledger;

/// A selected article and the tier it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick<'a> {
    pub article: &'a Article,
    pub tier: Tier,
}

/// Selection policy: who counts as "another reviewer" and how the fallback
/// tier is ordered.
#[derive(Debug, Clone, Copy)]
pub struct Selector<'a> {
    registry: &'a ReviewerRegistry,
    ordering: &'a [OrderingKey],
}

impl<'a> Selector<'a> {
    #[must_use]
    pub const fn new(registry: &'a ReviewerRegistry, ordering: &'a [OrderingKey]) -> Self {
        Self { registry, ordering }
    }

    /// Pick the next article for `reviewer`, or `None` when nothing is left.
    ///
    /// Never returns an article `reviewer` has answered or skipped.
    pub fn select_next<'c, R: Rng + ?Sized>(
        &self,
        reviewer: &str,
        catalog: &'c Catalog,
        ledger: &Ledger,
        rng: &mut R,
    ) -> Option<Pick<'c>> {
        if catalog.is_empty() {
            return None;
        }

        let own = ledger.reviewed_by(reviewer);
        let others = ledger.reviewed_by_others(reviewer, self.registry);

        let priority: Vec<&Article> = catalog
            .iter()
            .filter(|a| others.contains(a.title.as_str()) && !own.contains(a.title.as_str()))
            .collect();
        if let Some(&article) = priority.choose(rng) {
            tracing::debug!(
                reviewer,
                title = %article.title,
                candidates = priority.len(),
                "priority tier"
            );
            return Some(Pick {
                article,
                tier: Tier::Priority,
            });
        }

        let picked = catalog
            .iter()
            .filter(|a| !ledger.contains(&a.title) && !own.contains(a.title.as_str()))
            .min_by(|a, b| self.compare(a, b));
        match picked {
            Some(article) => {
                tracing::debug!(reviewer, title = %article.title, "fallback tier");
                Some(Pick {
                    article,
                    tier: Tier::Fallback,
                })
            }
            None => {
                tracing::debug!(reviewer, "queue exhausted");
                None
            }
        }
    }

    /// Order by each key in turn. `min_by` keeps the first of equal
    /// elements, so ties fall back to catalog order.
    fn compare(&self, a: &Article, b: &Article) -> Ordering {
        self.ordering
            .iter()
            .map(|key| {
                let lhs = a.attribute(&key.attribute).unwrap_or(0);
                let rhs = b.attribute(&key.attribute).unwrap_or(0);
                match key.direction {
                    SortDirection::Asc => lhs.cmp(&rhs),
                    SortDirection::Desc => rhs.cmp(&lhs),
                }
            })
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use revq_core::columns::ColumnKey;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_articles(
            vec![
                Article::new("A", "").with_attribute("Year", 2020).with_attribute("Citations", 5),
                Article::new("B", "").with_attribute("Year", 2019).with_attribute("Citations", 10),
                Article::new("C", "").with_attribute("Year", 2021).with_attribute("Citations", 1),
                Article::new("D", "").with_attribute("Year", 2021).with_attribute("Citations", 0),
            ],
            &["Year".to_string(), "Citations".to_string()],
        )
    }

    fn registry() -> ReviewerRegistry {
        ReviewerRegistry::from_pairs([("r1", "One"), ("r2", "Two"), ("r3", "Three")])
    }

    fn answered(ledger: &mut Ledger, reviewer: &str, title: &str) {
        ledger.set(title, "", ColumnKey::answer(reviewer, "Aspect 1"), "3".to_string());
    }

    #[test]
    fn fallback_uses_every_key_in_order() {
        let registry = registry();
        let ordering = [OrderingKey::desc("Year"), OrderingKey::asc("Citations")];
        let selector = Selector::new(&registry, &ordering);
        let mut rng = StdRng::seed_from_u64(1);

        let catalog = catalog();
        let pick = selector
            .select_next("r1", &catalog, &Ledger::default(), &mut rng)
            .unwrap();
        assert_eq!(pick.article.title, "D");
        assert_eq!(pick.tier, Tier::Fallback);
    }

    #[test]
    fn fallback_ties_keep_catalog_order() {
        let registry = registry();
        let selector = Selector::new(&registry, &[]);
        let mut rng = StdRng::seed_from_u64(1);
        let catalog = catalog();
        let pick = selector
            .select_next("r1", &catalog, &Ledger::default(), &mut rng)
            .unwrap();
        assert_eq!(pick.article.title, "A");
    }

    #[test]
    fn priority_choice_is_uniform_over_candidates() {
        let registry = registry();
        let ordering = [OrderingKey::desc("Year")];
        let selector = Selector::new(&registry, &ordering);
        let catalog = catalog();
        let mut ledger = Ledger::default();
        answered(&mut ledger, "r2", "A");
        answered(&mut ledger, "r3", "B");

        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::BTreeMap::new();
        for _ in 0..400 {
            let pick = selector.select_next("r1", &catalog, &ledger, &mut rng).unwrap();
            assert_eq!(pick.tier, Tier::Priority);
            *seen.entry(pick.article.title.clone()).or_insert(0) += 1;
        }
        assert_eq!(seen.len(), 2);
        assert!(seen.values().all(|&n| n > 120), "skewed: {seen:?}");
    }

    #[test]
    fn rows_without_reviews_block_fallback() {
        let registry = registry();
        let ordering = [OrderingKey::desc("Year"), OrderingKey::asc("Citations")];
        let selector = Selector::new(&registry, &ordering);
        let catalog = catalog();
        let mut ledger = Ledger::default();
        // Reviewed only by someone no longer registered.
        answered(&mut ledger, "ghost", "D");

        let mut rng = StdRng::seed_from_u64(3);
        let pick = selector.select_next("r1", &catalog, &ledger, &mut rng).unwrap();
        assert_eq!(pick.article.title, "C");
        assert_eq!(pick.tier, Tier::Fallback);
    }

    #[test]
    fn empty_catalog_selects_nothing() {
        let registry = registry();
        let selector = Selector::new(&registry, &[]);
        let mut rng = StdRng::seed_from_u64(0);
        let mut ledger = Ledger::default();
        answered(&mut ledger, "r2", "A");
        assert!(
            selector
                .select_next("r1", &Catalog::default(), &ledger, &mut rng)
                .is_none()
        );
    }
}
