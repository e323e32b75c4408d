//! Command implementations for the `poselib` CLI.

pub mod allocate;
pub mod cache;
pub mod combine;
pub mod hash;
pub mod show;
pub mod validate;
