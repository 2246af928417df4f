//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Interactive prompts behind the [`prompts::Prompter`] trait
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-facing output and prompts go through this module so that quiet
//! and non-interactive modes are honoured in one place.

pub mod output;
pub mod prompts;
