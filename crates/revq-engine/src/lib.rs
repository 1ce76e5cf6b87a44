//! # revq-engine
//!
//! Article assignment and evaluation recording.
//!
//! - [`catalog`]: builds the deduplicated article catalog from source tables
//! - [`ledger`]: the results table as a sparse title -> field map
//! - [`selection`]: picks the next article (priority tier, then fallback)
//! - [`filter`]: narrows the catalog by attribute ranges
//! - [`submission`]: writes answers or skips into the ledger
//! - [`resume`]: lists and pre-fills earlier evaluations for editing
//! - [`auth`]: static reviewer registry
//! - [`service`]: ties it together with the store and commits each change

pub mod auth;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod helpers;
pub mod ledger;
pub mod resume;
pub mod selection;
pub mod service;
pub mod session;
pub mod submission;

pub use auth::ReviewerRegistry;
pub use catalog::Catalog;
pub use error::EngineError;
pub use filter::{AttributeRange, RangeFilter};
pub use ledger::Ledger;
pub use resume::EditableFilter;
pub use selection::{Pick, Selector};
pub use service::{Presentation, ReviewService};
pub use session::{ReviewSession, SessionMode};
pub use submission::{AnswerSheet, Submission};
