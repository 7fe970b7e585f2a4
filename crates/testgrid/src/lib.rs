//! TestGrid dashboard generation for release-gating and release-informing
//! jobs.
//!
//! The Release Controller's configuration lists, for every release stream,
//! the jobs that verify a release candidate. This crate partitions those jobs
//! by product (OKD or OCP), version and whether they block the release, and
//! produces the matching TestGrid configuration.

pub mod config;
pub mod dashboard;
pub mod generator;
pub mod release;

pub use dashboard::{GeneratedDashboard, Role};
pub use generator::{Summary, generate};
pub use release::{Product, PublishTarget, ReleaseDescriptor};
