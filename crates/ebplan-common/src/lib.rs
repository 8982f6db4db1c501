//! # ebplan-common
//!
//! Shared types, error definitions, configuration model, and platform
//! vocabulary used across the ebplan workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and provides the primitives the plan builder and the CLI
//! are built on.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
