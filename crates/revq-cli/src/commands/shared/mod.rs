pub mod credentials;
pub mod parse;
