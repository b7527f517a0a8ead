//! Foundation types for conch.
//!
//! This crate holds the pieces shared by the shell core and the binary:
//! the error type and the TOML-backed shell configuration.

pub mod config;
pub mod error;
