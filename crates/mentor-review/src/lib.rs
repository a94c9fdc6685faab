//! Mentoring review of student pull requests, commit by commit.
//!
//! Provides the full review flow: GitHub PR client, event payload parsing,
//! changed-file filtering, task-context loading, prompt construction, the
//! Gemini client, review orchestration, and comment publishing.

pub mod comment;
pub mod context;
pub mod event;
pub mod filter;
pub mod github;
pub mod llm;
pub mod pipeline;
pub mod prompt;
