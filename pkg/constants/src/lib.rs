//! Centralized constants for op-kubeconfig.
//!
//! All project-wide constant values live here.
//! Change a value in one place and it applies everywhere.

pub mod exec;
pub mod paths;
pub mod secrets;
