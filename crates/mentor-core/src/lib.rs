//! Core types, configuration, and error handling for the mentor reviewer.
//!
//! This crate provides the shared foundation used by the review crate and
//! the binary:
//! - [`MentorError`] — unified error type using `thiserror`
//! - [`MentorConfig`] — configuration loaded from `.mentor.toml`
//! - Shared types: [`Commit`], [`ChangedFile`], [`FileStatus`],
//!   [`CommitDetail`], [`ReviewFeedback`], [`SkipReason`]

mod config;
mod error;
mod types;

pub use config::{FilterConfig, LlmConfig, MentorConfig};
pub use error::MentorError;
pub use types::{ChangedFile, Commit, CommitDetail, FileStatus, ReviewFeedback, SkipReason};

/// A convenience `Result` type for mentor operations.
pub type Result<T> = std::result::Result<T, MentorError>;
