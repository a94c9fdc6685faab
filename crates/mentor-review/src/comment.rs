//! Assembling and posting the aggregated PR comment.

use async_trait::async_trait;
use mentor_core::{MentorError, ReviewFeedback};
use tracing::{error, info, warn};

/// Separator between per-commit feedback blocks.
const SEPARATOR: &str = "\n\n---\n\n";

const HEADER: &str = "\u{1f393} **AI Mentor Review** - a detailed look at every commit\n\n";

const FOOTER: &str = "\n\n---\n\n\u{1f4a1} *This feedback was generated by AI. \
If anything is unclear, ask your mentor!*";

/// Write side of the repository host: posting one comment.
#[async_trait]
pub trait CommentSink: Send + Sync {
    /// Post a comment on the pull request.
    async fn post_issue_comment(
        &self,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<(), MentorError>;
}

/// Join all feedback entries into the combined comment body.
///
/// # Examples
///
/// ```
/// use mentor_core::ReviewFeedback;
/// use mentor_review::comment::build_comment_body;
///
/// let feedback = vec![ReviewFeedback {
///     short_sha: "abc1234".into(),
///     message: "add form".into(),
///     body: "Nice work.".into(),
/// }];
/// let body = build_comment_body(&feedback);
/// assert!(body.contains("**[`abc1234`]** add form"));
/// ```
pub fn build_comment_body(feedback: &[ReviewFeedback]) -> String {
    let blocks: Vec<String> = feedback.iter().map(ReviewFeedback::to_markdown).collect();
    format!("{HEADER}{}{FOOTER}", blocks.join(SEPARATOR))
}

/// Wrap the combined body with the outer Markdown heading.
pub fn wrap_comment(body: &str) -> String {
    format!("### \u{1f393} Commit review (AI Mentor)\n\n{body}")
}

/// Post the aggregated review comment.
///
/// With no feedback at all, nothing is posted and a warning is logged. A
/// post failure is logged and swallowed so the run still completes.
/// Returns whether a comment was actually posted.
pub async fn publish_review(
    sink: &impl CommentSink,
    repo: &str,
    pr_number: u64,
    feedback: &[ReviewFeedback],
) -> bool {
    if feedback.is_empty() {
        warn!("no feedback generated for any commits; not posting a comment");
        return false;
    }

    let body = wrap_comment(&build_comment_body(feedback));
    match sink.post_issue_comment(repo, pr_number, &body).await {
        Ok(()) => {
            info!("comment posted successfully");
            true
        }
        Err(e) => {
            error!("failed to post comment: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn entry(sha: &str, message: &str, body: &str) -> ReviewFeedback {
        ReviewFeedback {
            short_sha: sha.into(),
            message: message.into(),
            body: body.into(),
        }
    }

    struct MockSink {
        posts: Mutex<Vec<String>>,
        failing: bool,
    }

    impl MockSink {
        fn new(failing: bool) -> Self {
            Self {
                posts: Mutex::new(Vec::new()),
                failing,
            }
        }
    }

    #[async_trait]
    impl CommentSink for MockSink {
        async fn post_issue_comment(
            &self,
            _repo: &str,
            _issue_number: u64,
            body: &str,
        ) -> Result<(), MentorError> {
            self.posts.lock().unwrap().push(body.to_string());
            if self.failing {
                return Err(MentorError::GitHub("422".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn body_joins_entries_with_separator() {
        let feedback = vec![
            entry("abc1234", "add form", "first block"),
            entry("def5678", "style it", "second block"),
        ];
        let body = build_comment_body(&feedback);

        assert!(body.starts_with(HEADER));
        assert!(body.ends_with(FOOTER));
        assert!(body.contains("**[`abc1234`]** add form\n\nfirst block"));
        assert!(body.contains("**[`def5678`]** style it\n\nsecond block"));
        assert!(body.contains(SEPARATOR));
        let first = body.find("first block").unwrap();
        let second = body.find("second block").unwrap();
        assert!(first < second, "commit order must be preserved");
    }

    #[test]
    fn wrapped_comment_has_outer_heading() {
        let wrapped = wrap_comment("inner");
        assert!(wrapped.starts_with("### "));
        assert!(wrapped.ends_with("inner"));
    }

    #[tokio::test]
    async fn empty_feedback_never_posts() {
        let sink = MockSink::new(false);
        let posted = publish_review(&sink, "school/repo", 1, &[]).await;
        assert!(!posted);
        assert!(sink.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn posts_single_aggregated_comment() {
        let sink = MockSink::new(false);
        let feedback = vec![entry("abc1234", "add form", "looks good")];
        let posted = publish_review(&sink, "school/repo", 1, &feedback).await;

        assert!(posted);
        let posts = sink.posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts[0].contains("**[`abc1234`]** add form"));
        assert!(posts[0].starts_with("### "));
    }

    #[tokio::test]
    async fn post_failure_is_swallowed() {
        let sink = MockSink::new(true);
        let feedback = vec![entry("abc1234", "add form", "looks good")];
        let posted = publish_review(&sink, "school/repo", 1, &feedback).await;
        assert!(!posted);
    }
}
