//! CLI module for aigit
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod commands;
pub mod interact;
pub mod commit;
pub mod branch;
pub mod pr;
pub mod review;
pub mod explain;
pub mod config;

pub use commands::{Cli, Commands};
