use std::fmt;

use serde::{Deserialize, Serialize};

/// One commit of the pull request under review.
///
/// Produced by the GitHub client from the "list PR commits" endpoint;
/// consumed once by the review loop and discarded.
///
/// # Examples
///
/// ```
/// use mentor_core::Commit;
///
/// let commit = Commit {
///     sha: "abc1234def5678".into(),
///     message: "add form".into(),
/// };
/// assert_eq!(commit.short_sha(), "abc1234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit hash.
    pub sha: String,
    /// Commit message as authored.
    pub message: String,
}

impl Commit {
    /// Abbreviated hash, the first 7 characters.
    pub fn short_sha(&self) -> &str {
        let end = self
            .sha
            .char_indices()
            .nth(7)
            .map_or(self.sha.len(), |(i, _)| i);
        &self.sha[..end]
    }
}

/// Change status of a file within a commit, as reported by the GitHub API.
///
/// # Examples
///
/// ```
/// use mentor_core::FileStatus;
///
/// let status: FileStatus = serde_json::from_str("\"modified\"").unwrap();
/// assert_eq!(status, FileStatus::Modified);
/// assert_eq!(status.to_string(), "modified");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// File added in this commit.
    Added,
    /// Existing file modified.
    Modified,
    /// File removed.
    Removed,
    /// File renamed.
    Renamed,
    /// Any other status string the API reports (copied, changed, unchanged).
    #[serde(other)]
    Other,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileStatus::Added => "added",
            FileStatus::Modified => "modified",
            FileStatus::Removed => "removed",
            FileStatus::Renamed => "renamed",
            FileStatus::Other => "changed",
        };
        f.write_str(s)
    }
}

/// A single changed file within one commit.
///
/// `patch` is absent for binary files and very large diffs; such entries
/// never reach the prompt even when the extension is allowlisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Path of the file within the repository.
    pub filename: String,
    /// Change status reported by the API.
    pub status: FileStatus,
    /// Unified diff hunks for this file, when the API provides them.
    #[serde(default)]
    pub patch: Option<String>,
}

/// A commit together with its changed files, from the "get commit" endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDetail {
    /// The commit itself.
    pub commit: Commit,
    /// Changed files in API order.
    pub files: Vec<ChangedFile>,
}

/// Mentoring feedback generated for one commit.
///
/// # Examples
///
/// ```
/// use mentor_core::ReviewFeedback;
///
/// let feedback = ReviewFeedback {
///     short_sha: "abc1234".into(),
///     message: "add form".into(),
///     body: "Nice use of semantic HTML.".into(),
/// };
/// assert_eq!(
///     feedback.to_markdown(),
///     "**[`abc1234`]** add form\n\nNice use of semantic HTML.",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewFeedback {
    /// Abbreviated commit hash.
    pub short_sha: String,
    /// Commit message.
    pub message: String,
    /// Model-generated feedback text, trimmed.
    pub body: String,
}

impl ReviewFeedback {
    /// Render the feedback as a Markdown block headed by the commit.
    pub fn to_markdown(&self) -> String {
        format!("**[`{}`]** {}\n\n{}", self.short_sha, self.message, self.body)
    }
}

/// Why a commit produced no feedback.
///
/// The review loop yields an explicit `Result<ReviewFeedback, SkipReason>`
/// per commit so that skips stay auditable instead of being silently
/// swallowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Fetching the commit's changed files failed.
    DetailFetchFailed(String),
    /// No changed file survived the filter (or none carried patch text).
    NoRelevantFiles,
    /// The model call failed for this commit.
    Generation(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::DetailFetchFailed(e) => write!(f, "failed to fetch commit changes: {e}"),
            SkipReason::NoRelevantFiles => write!(f, "no relevant files changed"),
            SkipReason::Generation(e) => write!(f, "feedback generation failed: {e}"),
        }
    }
}
