//! Core functionality for aigit
//!
//! This module contains shared business logic including:
//! - Git repository operations
//! - Remote repository detection
//! - Credential lookup
//! - Application configuration

pub mod config;
pub mod credentials;
pub mod git;
pub mod repository;

pub use config::{Config, Provider};
pub use credentials::CredentialStore;
pub use git::GitRepository;
pub use repository::{parse_remote, RemoteRepository};
