//! Pose library CLI library.
//!
//! This crate provides the core functionality for the `poselib` CLI:
//! document loading, the build cache, and the command implementations.

pub mod cache;
pub mod commands;
pub mod input;
