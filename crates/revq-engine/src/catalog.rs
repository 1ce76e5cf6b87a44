//! Article catalog: the deduplicated union of every source table.

use std::collections::HashMap;

use revq_core::columns::{ABSTRACT_COLUMN, TITLE_COLUMN};
use revq_core::entities::Article;
use revq_core::table::Table;
use revq_store::TableStore;

use crate::error::EngineError;
use crate::helpers::coerce_attribute;

/// Read-only set of articles, unique by title, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    articles: Vec<Article>,
    index: HashMap<String, usize>,
    attributes: Vec<String>,
}

impl Catalog {
    /// Union `tables`, check required columns, coerce `attributes`, and
    /// deduplicate by title (first occurrence wins).
    ///
    /// Tables without rows are skipped. Rows with an empty title are dropped.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingColumns` naming every required column
    /// (`Title`, `Abstract`, each attribute) absent from the union.
    pub fn build(tables: &[Table], attributes: &[String]) -> Result<Self, EngineError> {
        let sources: Vec<Table> = tables.iter().filter(|t| !t.is_empty()).cloned().collect();
        if sources.is_empty() {
            tracing::debug!("no catalog rows in any source table");
            return Ok(Self::from_articles(Vec::new(), attributes));
        }
        let merged = Table::concat(&sources);

        let missing: Vec<String> = [TITLE_COLUMN, ABSTRACT_COLUMN]
            .into_iter()
            .chain(attributes.iter().map(String::as_str))
            .filter(|c| !merged.has_column(c))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::MissingColumns { columns: missing });
        }

        let mut articles = Vec::with_capacity(merged.len());
        for (row, record) in merged.records().enumerate() {
            let Some(title) = record.get(TITLE_COLUMN) else {
                tracing::warn!(row, "dropping catalog row without a title");
                continue;
            };
            let mut article = Article::new(title, record.get(ABSTRACT_COLUMN).unwrap_or_default());
            for attr in attributes {
                article = article.with_attribute(attr.clone(), coerce_attribute(record.get(attr)));
            }
            articles.push(article);
        }

        Ok(Self::from_articles(articles, attributes))
    }

    /// Build from already-typed articles. Later duplicates of a title are dropped.
    #[must_use]
    pub fn from_articles(articles: Vec<Article>, attributes: &[String]) -> Self {
        let mut out = Self {
            articles: Vec::with_capacity(articles.len()),
            index: HashMap::with_capacity(articles.len()),
            attributes: attributes.to_vec(),
        };
        for article in articles {
            if out.index.contains_key(&article.title) {
                tracing::warn!(title = %article.title, "duplicate title in catalog; keeping first");
                continue;
            }
            out.index.insert(article.title.clone(), out.articles.len());
            out.articles.push(article);
        }
        out
    }

    #[must_use]
    pub fn get(&self, title: &str) -> Option<&Article> {
        self.index.get(title).map(|&i| &self.articles[i])
    }

    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.index.contains_key(title)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.articles.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// The ordering attributes every article carries.
    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Smallest and largest value of `attribute`, or `None` for an empty
    /// catalog or an attribute the catalog does not carry.
    #[must_use]
    pub fn attribute_bounds(&self, attribute: &str) -> Option<(u64, u64)> {
        if !self.attributes.iter().any(|a| a == attribute) {
            return None;
        }
        self.articles
            .iter()
            .map(|a| a.attribute(attribute).unwrap_or(0))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Subset keeping source order.
    pub(crate) fn retain(&self, mut keep: impl FnMut(&Article) -> bool) -> Self {
        let kept = self.articles.iter().filter(|a| keep(a)).cloned().collect();
        Self::from_articles(kept, &self.attributes)
    }
}

/// Load the named source tables (or every table the store lists, when
/// `tables` is empty) and build the catalog.
///
/// `exclude` names a table to leave out of the listing, for stores that also
/// hold the results table.
///
/// # Errors
///
/// Returns `EngineError::Store` if a table cannot be loaded, or
/// `EngineError::MissingColumns` from [`Catalog::build`].
pub async fn load_catalog<S: TableStore>(
    store: &S,
    tables: &[String],
    attributes: &[String],
    exclude: Option<&str>,
) -> Result<Catalog, EngineError> {
    let names = if tables.is_empty() {
        store
            .list_tables()
            .await?
            .into_iter()
            .filter(|n| Some(n.as_str()) != exclude)
            .collect()
    } else {
        tables.to_vec()
    };

    let mut loaded = Vec::with_capacity(names.len());
    for name in &names {
        loaded.push(store.load(name).await?);
    }
    let catalog = Catalog::build(&loaded, attributes)?;
    tracing::debug!(tables = names.len(), articles = catalog.len(), "catalog built");
    Ok(catalog)
}
