//! # revq-core
//!
//! Core types shared across all revq crates.
//!
//! - `Table`: the column-oriented shape every store loads and saves
//! - Entity structs for articles, reviewers, and evaluation aspects
//! - Ledger column keys (`<reviewer>/<aspect label>`, `<reviewer>/EvaluationDate`)
//! - Cross-cutting error types
//! - CLI response types

pub mod columns;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
pub mod table;
