//! # ebplan-compose
//!
//! Composes the resource descriptors that provision one managed platform
//! environment from an [`EnvironmentVariantConfig`](ebplan_common::config::EnvironmentVariantConfig).
//!
//! Handles:
//! - **Options**: Fixed option blocks per feature and their ordered, conflict-checked merge.
//! - **Variant**: Runtime-specific options and permission grants.
//! - **Descriptor**: Immutable resource descriptors and deferred attribute references.
//! - **Builder**: Construction of the full plan in dependency order.
//! - **Plan**: The read-only, ordered result handed to a provisioning engine.
//! - **Graph**: Dependency graph view of a plan for order verification.
//!
//! Construction is synchronous and performs no I/O.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod builder;
pub mod descriptor;
pub mod graph;
pub mod options;
pub mod plan;
pub mod variant;

pub use builder::build;
pub use plan::DeploymentPlan;
