//! CLI commands

pub mod config;
pub mod demo;
pub mod diagnostics;
pub mod sandbox;
pub mod simulate;
