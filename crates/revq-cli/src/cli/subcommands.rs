mod edit;

pub use edit::EditCommands;
