//! Integration test utilities for the feedback engine
//!
//! This crate provides helpers for running end-to-end tests through the
//! service layer against a fresh in-memory engine.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
