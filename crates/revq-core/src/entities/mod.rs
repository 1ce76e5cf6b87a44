//! Entity structs for revq domain objects.
//!
//! All structs derive `Serialize` and `JsonSchema` so they can appear in CLI
//! responses. `Aspect` and `OrderingKey` also deserialize, since they are
//! read from configuration.

mod article;
mod aspect;
mod ordering;
mod reviewer;

pub use article::Article;
pub use aspect::Aspect;
pub use ordering::OrderingKey;
pub use reviewer::Reviewer;
