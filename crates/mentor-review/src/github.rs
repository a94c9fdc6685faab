use async_trait::async_trait;
use mentor_core::{ChangedFile, Commit, CommitDetail, MentorError};
use serde::Deserialize;

use crate::comment::CommentSink;
use crate::pipeline::CommitHost;

/// GitHub REST client for the three operations the reviewer needs:
/// list PR commits, fetch one commit's changed files, post a PR comment.
///
/// # Examples
///
/// ```
/// use mentor_review::github::parse_repo;
///
/// let (owner, repo) = parse_repo("octocat/hello-world").unwrap();
/// assert_eq!(owner, "octocat");
/// assert_eq!(repo, "hello-world");
/// ```
pub struct GitHubClient {
    octocrab: octocrab::Octocrab,
    http: reqwest::Client,
    token: String,
}

#[derive(Debug, Deserialize)]
struct CommitBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ListedCommit {
    sha: String,
    commit: CommitBody,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    sha: String,
    commit: CommitBody,
    #[serde(default)]
    files: Vec<ChangedFile>,
}

impl GitHubClient {
    /// Create a client from an explicit token or the `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`MentorError::Config`] if no token is available, or
    /// [`MentorError::GitHub`] if the client cannot be built.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use mentor_review::github::GitHubClient;
    ///
    /// let client = GitHubClient::new(Some("ghp_xxxx")).unwrap();
    /// ```
    pub fn new(token: Option<&str>) -> Result<Self, MentorError> {
        let token = match token {
            Some(t) => t.to_string(),
            None => std::env::var("GITHUB_TOKEN").map_err(|_| {
                MentorError::Config("GITHUB_TOKEN not set. Set the GITHUB_TOKEN env var".into())
            })?,
        };

        let octocrab = octocrab::Octocrab::builder()
            .personal_token(token.clone())
            .build()
            .map_err(|e| MentorError::GitHub(format!("failed to create GitHub client: {e}")))?;

        let http = reqwest::Client::new();

        Ok(Self {
            octocrab,
            http,
            token,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<T, MentorError> {
        let response = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", "mentor")
            .send()
            .await
            .map_err(|e| MentorError::GitHub(format!("failed to fetch {what}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MentorError::GitHub(format!(
                "GitHub API error {status} fetching {what}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| MentorError::GitHub(format!("failed to decode {what}: {e}")))
    }

    /// Fetch all commits of a pull request, in API order.
    ///
    /// # Errors
    ///
    /// Returns [`MentorError::GitHub`] on network or API errors. The caller
    /// treats this as fatal; without the commit list there is nothing to
    /// review.
    pub async fn list_pr_commits(
        &self,
        repo: &str,
        pr_number: u64,
    ) -> Result<Vec<Commit>, MentorError> {
        let url = format!("https://api.github.com/repos/{repo}/pulls/{pr_number}/commits");
        let listed: Vec<ListedCommit> = self.get_json(&url, "PR commits").await?;
        Ok(listed
            .into_iter()
            .map(|c| Commit {
                sha: c.sha,
                message: c.commit.message,
            })
            .collect())
    }

    /// Fetch one commit with its changed files and per-file patches.
    ///
    /// # Errors
    ///
    /// Returns [`MentorError::GitHub`] on network or API errors. The review
    /// loop recovers by skipping the commit.
    pub async fn get_commit(&self, repo: &str, sha: &str) -> Result<CommitDetail, MentorError> {
        let url = format!("https://api.github.com/repos/{repo}/commits/{sha}");
        let detail: CommitResponse = self.get_json(&url, "commit changes").await?;
        Ok(CommitDetail {
            commit: Commit {
                sha: detail.sha,
                message: detail.commit.message,
            },
            files: detail.files,
        })
    }

    /// Post a comment on the pull request (PRs share the issue comment
    /// endpoint).
    ///
    /// # Errors
    ///
    /// Returns [`MentorError::GitHub`] on API errors. The publisher logs the
    /// failure and lets the run complete.
    pub async fn post_issue_comment(
        &self,
        repo: &str,
        issue_number: u64,
        body_text: &str,
    ) -> Result<(), MentorError> {
        let route = format!("/repos/{repo}/issues/{issue_number}/comments");
        let body = serde_json::json!({ "body": body_text });

        let _response: serde_json::Value = self
            .octocrab
            .post(route, Some(&body))
            .await
            .map_err(|e| MentorError::GitHub(format!("failed to post comment: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl CommitHost for GitHubClient {
    async fn list_pr_commits(&self, repo: &str, pr_number: u64) -> Result<Vec<Commit>, MentorError> {
        GitHubClient::list_pr_commits(self, repo, pr_number).await
    }

    async fn commit_detail(&self, repo: &str, sha: &str) -> Result<CommitDetail, MentorError> {
        self.get_commit(repo, sha).await
    }
}

#[async_trait]
impl CommentSink for GitHubClient {
    async fn post_issue_comment(
        &self,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<(), MentorError> {
        GitHubClient::post_issue_comment(self, repo, issue_number, body).await
    }
}

/// Validate a repository full name (`owner/repo`) into its components.
///
/// # Errors
///
/// Returns [`MentorError::Config`] if the format is invalid.
///
/// # Examples
///
/// ```
/// use mentor_review::github::parse_repo;
///
/// let (owner, repo) = parse_repo("rust-lang/rust").unwrap();
/// assert_eq!(owner, "rust-lang");
/// assert_eq!(repo, "rust");
/// ```
pub fn parse_repo(full_name: &str) -> Result<(String, String), MentorError> {
    let Some((owner, repo)) = full_name.split_once('/') else {
        return Err(MentorError::Config(format!(
            "invalid repository '{full_name}', expected owner/repo"
        )));
    };
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return Err(MentorError::Config(format!(
            "invalid repository '{full_name}', expected owner/repo"
        )));
    }
    Ok((owner.to_string(), repo.to_string()))
}
