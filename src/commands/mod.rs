//! CLI command implementations.
//!
//! Each command resolves its project directory from the [`crate::LabelContext`],
//! calls into the project core, and reports through [`crate::output`].

pub mod add;
pub mod choose;
pub mod cleanup;
pub mod config;
pub mod export;
pub mod is_empty;
pub mod list;
pub mod new;
pub mod remove;
pub mod serve;
pub mod status;
