use std::fmt;

use async_trait::async_trait;
use mentor_core::{ChangedFile, Commit, CommitDetail, MentorError, ReviewFeedback, SkipReason};
use serde::Serialize;
use tracing::{info, warn};

use crate::filter::FileFilter;
use crate::prompt;

/// Read side of the repository host, as the review loop sees it.
///
/// [`crate::github::GitHubClient`] is the production implementation; tests
/// substitute an in-memory host.
#[async_trait]
pub trait CommitHost: Send + Sync {
    /// List the commits of a pull request, in API order.
    async fn list_pr_commits(&self, repo: &str, pr_number: u64)
        -> Result<Vec<Commit>, MentorError>;

    /// Fetch one commit's changed files.
    async fn commit_detail(&self, repo: &str, sha: &str) -> Result<CommitDetail, MentorError>;
}

/// A generative model that turns one prompt into feedback text.
#[async_trait]
pub trait ReviewModel: Send + Sync {
    /// Model identifier, for run statistics.
    fn model(&self) -> &str;

    /// Generate feedback for one prompt.
    async fn generate(&self, prompt: &str) -> Result<String, MentorError>;
}

#[async_trait]
impl ReviewModel for crate::llm::GeminiClient {
    fn model(&self) -> &str {
        crate::llm::GeminiClient::model(self)
    }

    async fn generate(&self, prompt: &str) -> Result<String, MentorError> {
        crate::llm::GeminiClient::generate(self, prompt).await
    }
}

/// A commit that produced no feedback, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCommit {
    /// Abbreviated commit hash.
    pub short_sha: String,
    /// Why the commit was skipped.
    pub reason: SkipReason,
}

/// Statistics about a review run.
///
/// # Examples
///
/// ```
/// use mentor_review::pipeline::ReviewStats;
///
/// let stats = ReviewStats {
///     commits_total: 3,
///     commits_reviewed: 2,
///     commits_skipped: 1,
///     files_reviewed: 5,
///     model_used: "gemini-2.5-pro".into(),
/// };
/// assert_eq!(stats.commits_reviewed + stats.commits_skipped, stats.commits_total);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ReviewStats {
    /// Commits returned by the PR.
    pub commits_total: usize,
    /// Commits that produced feedback.
    pub commits_reviewed: usize,
    /// Commits skipped (fetch failure, nothing relevant, model failure).
    pub commits_skipped: usize,
    /// Changed files that reached a prompt.
    pub files_reviewed: usize,
    /// Model identifier used for the run.
    pub model_used: String,
}

/// Result of a completed review run.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    /// Feedback entries, in commit order.
    pub feedback: Vec<ReviewFeedback>,
    /// Skipped commits with reasons, in commit order.
    pub skipped: Vec<SkippedCommit>,
    /// Run statistics.
    pub stats: ReviewStats,
}

impl fmt::Display for ReviewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Reviewed {} of {} commits ({} skipped, {} files) with {}",
            self.stats.commits_reviewed,
            self.stats.commits_total,
            self.stats.commits_skipped,
            self.stats.files_reviewed,
            self.stats.model_used,
        )?;
        for s in &self.skipped {
            writeln!(f, "  skipped {}: {}", s.short_sha, s.reason)?;
        }
        Ok(())
    }
}

/// Drives the full review: fetch commits, filter each commit's files, build
/// a prompt, call the model, collect feedback.
///
/// Commits are processed strictly one at a time, in API order. Each commit
/// yields an explicit `Result<ReviewFeedback, SkipReason>`; skips are
/// logged and collected, never silently swallowed. Only the initial commit
/// list fetch is fatal.
pub struct ReviewPipeline<H, M> {
    host: H,
    model: M,
    filter: FileFilter,
}

impl<H: CommitHost, M: ReviewModel> ReviewPipeline<H, M> {
    /// Create a pipeline from a host, a model, and a file filter.
    pub fn new(host: H, model: M, filter: FileFilter) -> Self {
        Self {
            host,
            model,
            filter,
        }
    }

    /// Borrow the repository host, e.g. to post the final comment through
    /// the same client.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Review every commit of the pull request.
    ///
    /// # Errors
    ///
    /// Returns [`MentorError::GitHub`] if the commit list cannot be
    /// fetched; everything after that degrades to per-commit skips.
    pub async fn run(
        &self,
        repo: &str,
        pr_number: u64,
        task_context: Option<&str>,
    ) -> Result<ReviewOutcome, MentorError> {
        let commits = self.host.list_pr_commits(repo, pr_number).await?;
        info!("found {} commits", commits.len());

        let mut feedback = Vec::new();
        let mut skipped = Vec::new();
        let mut files_reviewed = 0;

        for commit in &commits {
            info!(sha = commit.short_sha(), "reviewing commit: {}", commit.message);
            match self.review_commit(repo, commit, task_context).await {
                Ok((entry, file_count)) => {
                    files_reviewed += file_count;
                    feedback.push(entry);
                }
                Err(reason) => {
                    warn!(sha = commit.short_sha(), "skipping commit: {reason}");
                    skipped.push(SkippedCommit {
                        short_sha: commit.short_sha().to_string(),
                        reason,
                    });
                }
            }
        }

        Ok(ReviewOutcome {
            stats: ReviewStats {
                commits_total: commits.len(),
                commits_reviewed: feedback.len(),
                commits_skipped: skipped.len(),
                files_reviewed,
                model_used: self.model.model().to_string(),
            },
            feedback,
            skipped,
        })
    }

    /// Review one commit; any failure becomes a [`SkipReason`].
    async fn review_commit(
        &self,
        repo: &str,
        commit: &Commit,
        task_context: Option<&str>,
    ) -> Result<(ReviewFeedback, usize), SkipReason> {
        let detail = self
            .host
            .commit_detail(repo, &commit.sha)
            .await
            .map_err(|e| SkipReason::DetailFetchFailed(e.to_string()))?;

        let kept = self.relevant_files(&detail);
        if kept.is_empty() {
            return Err(SkipReason::NoRelevantFiles);
        }
        info!("analyzing {} changed files", kept.len());

        let changes = prompt::render_changed_files(&kept);
        let prompt_text = prompt::build_prompt(task_context, &changes);

        let body = self
            .model
            .generate(&prompt_text)
            .await
            .map_err(|e| SkipReason::Generation(e.to_string()))?;

        let file_count = kept.len();
        Ok((
            ReviewFeedback {
                short_sha: commit.short_sha().to_string(),
                message: commit.message.clone(),
                body,
            },
            file_count,
        ))
    }

    /// Files that pass the filter and carry patch text, in API order.
    fn relevant_files<'a>(&self, detail: &'a CommitDetail) -> Vec<&'a ChangedFile> {
        detail
            .files
            .iter()
            .filter(|f| f.patch.is_some() && !self.filter.should_ignore(&f.filename))
            .collect()
    }
}
