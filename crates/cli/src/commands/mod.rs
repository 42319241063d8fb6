//! Command implementations.

pub mod config;
