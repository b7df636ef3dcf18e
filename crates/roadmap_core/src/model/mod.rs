//! Roadmap domain model consumed by the layout engine.
//!
//! # Responsibility
//! - Define the project/milestone shapes supplied by the hosting application.
//! - Keep one status vocabulary shared by projects and milestones.
//!
//! # Invariants
//! - Entities are immutable snapshots for the duration of one render pass.
//! - Identifiers are used as stable keys only; uniqueness is not enforced.

pub mod project;
