pub mod catalog;
pub mod dispatch;
pub mod edit;
pub mod next;
pub mod review;
pub mod schema;
pub mod shared;
pub mod skip;
pub mod submit;
pub mod whoami;
