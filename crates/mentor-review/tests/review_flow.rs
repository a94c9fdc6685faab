//! End-to-end review flow against in-memory host, model, and sink.

use std::sync::Mutex;

use async_trait::async_trait;
use mentor_core::{ChangedFile, Commit, CommitDetail, FileStatus, MentorError};
use mentor_review::comment::{publish_review, CommentSink};
use mentor_review::filter::FileFilter;
use mentor_review::pipeline::{CommitHost, ReviewModel, ReviewPipeline};

struct StaticHost {
    commits: Vec<Commit>,
    details: Vec<CommitDetail>,
}

#[async_trait]
impl CommitHost for StaticHost {
    async fn list_pr_commits(
        &self,
        _repo: &str,
        _pr_number: u64,
    ) -> Result<Vec<Commit>, MentorError> {
        Ok(self.commits.clone())
    }

    async fn commit_detail(&self, _repo: &str, sha: &str) -> Result<CommitDetail, MentorError> {
        self.details
            .iter()
            .find(|d| d.commit.sha == sha)
            .cloned()
            .ok_or_else(|| MentorError::GitHub(format!("unknown sha {sha}")))
    }
}

struct EchoModel;

#[async_trait]
impl ReviewModel for EchoModel {
    fn model(&self) -> &str {
        "echo"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, MentorError> {
        Ok("Great start, keep going.".into())
    }
}

#[derive(Default)]
struct RecordingSink {
    posts: Mutex<Vec<(u64, String)>>,
}

#[async_trait]
impl CommentSink for RecordingSink {
    async fn post_issue_comment(
        &self,
        _repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<(), MentorError> {
        self.posts.lock().unwrap().push((issue_number, body.to_string()));
        Ok(())
    }
}

fn form_commit() -> (Commit, CommitDetail) {
    let commit = Commit {
        sha: "abc1234def567890".into(),
        message: "add form".into(),
    };
    let detail = CommitDetail {
        commit: commit.clone(),
        files: vec![ChangedFile {
            filename: "index.html".into(),
            status: FileStatus::Modified,
            patch: Some("+<label>...</label>".into()),
        }],
    };
    (commit, detail)
}

fn bundle_commit() -> (Commit, CommitDetail) {
    let commit = Commit {
        sha: "9876543210fedcba".into(),
        message: "commit build output".into(),
    };
    let detail = CommitDetail {
        commit: commit.clone(),
        files: vec![ChangedFile {
            filename: "dist/bundle.js".into(),
            status: FileStatus::Added,
            patch: Some("+!function(){}();".into()),
        }],
    };
    (commit, detail)
}

#[tokio::test]
async fn reviews_and_posts_one_aggregated_comment() {
    let (c1, d1) = form_commit();
    let (c2, d2) = bundle_commit();
    let host = StaticHost {
        commits: vec![c1, c2],
        details: vec![d1, d2],
    };
    let pipeline = ReviewPipeline::new(host, EchoModel, FileFilter::default_filter());

    let outcome = pipeline
        .run("school/student-repo", 42, Some("Build a sign-up form."))
        .await
        .unwrap();

    // one reviewed, one skipped as build noise
    assert_eq!(outcome.stats.commits_total, 2);
    assert_eq!(outcome.feedback.len(), 1);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.feedback[0].short_sha, "abc1234");

    let sink = RecordingSink::default();
    let posted = publish_review(&sink, "school/student-repo", 42, &outcome.feedback).await;
    assert!(posted);

    let posts = sink.posts.lock().unwrap();
    assert_eq!(posts.len(), 1);
    let (number, body) = &posts[0];
    assert_eq!(*number, 42);
    assert!(body.contains("**[`abc1234`]** add form"));
    assert!(body.contains("Great start, keep going."));
    assert!(!body.contains("dist/bundle.js"));
}

#[tokio::test]
async fn all_commits_skipped_means_no_comment() {
    let (c, d) = bundle_commit();
    let host = StaticHost {
        commits: vec![c],
        details: vec![d],
    };
    let pipeline = ReviewPipeline::new(host, EchoModel, FileFilter::default_filter());

    let outcome = pipeline.run("school/student-repo", 7, None).await.unwrap();
    assert!(outcome.feedback.is_empty());

    let sink = RecordingSink::default();
    let posted = publish_review(&sink, "school/student-repo", 7, &outcome.feedback).await;
    assert!(!posted);
    assert!(sink.posts.lock().unwrap().is_empty());
}
