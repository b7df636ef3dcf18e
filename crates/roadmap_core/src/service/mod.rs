//! Host-facing services.
//!
//! # Responsibility
//! - Own the single piece of mutable state (the center date).
//! - Keep hosts decoupled from engine internals.

pub mod navigation;
pub mod timeline_service;
