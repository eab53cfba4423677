//! CLI command implementations.

pub mod bell;
pub mod common;
pub mod hash;
