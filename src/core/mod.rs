//! core
//!
//! Core domain types, naming rules and configuration for convoy.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Region, PipelineName
//! - [`naming`] - Pipeline and secret naming rules
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Name derivation is pure and deterministic

pub mod config;
pub mod naming;
pub mod types;
