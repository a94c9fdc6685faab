//! Extracting the pull-request number from the Actions event payload.

use std::path::Path;

use mentor_core::MentorError;

/// Read the event payload file and extract the pull-request number.
///
/// # Errors
///
/// Returns [`MentorError::Io`] if the file cannot be read,
/// [`MentorError::Serialization`] if it is not JSON, or
/// [`MentorError::Event`] if the event has no pull-request context.
/// Non-PR events are not reviewed, so the last case is fatal to the run.
pub fn pr_number_from_event_file(path: &Path) -> Result<u64, MentorError> {
    let content = std::fs::read_to_string(path)?;
    pr_number_from_event(&content)
}

/// Extract `pull_request.number` from an event payload JSON string.
///
/// # Errors
///
/// Returns [`MentorError::Serialization`] for malformed JSON and
/// [`MentorError::Event`] when no pull-request number is present.
///
/// # Examples
///
/// ```
/// use mentor_review::event::pr_number_from_event;
///
/// let payload = r#"{ "action": "opened", "pull_request": { "number": 42 } }"#;
/// assert_eq!(pr_number_from_event(payload).unwrap(), 42);
/// ```
pub fn pr_number_from_event(payload: &str) -> Result<u64, MentorError> {
    let event: serde_json::Value = serde_json::from_str(payload)?;
    event
        .get("pull_request")
        .and_then(|pr| pr.get("number"))
        .and_then(|n| n.as_u64())
        .ok_or_else(|| {
            MentorError::Event(
                "not a pull request event; nothing to review and nowhere to comment".into(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_pr_number() {
        let payload = r#"{
            "action": "synchronize",
            "pull_request": { "number": 7, "title": "Sign-up form" },
            "repository": { "full_name": "school/student-repo" }
        }"#;
        assert_eq!(pr_number_from_event(payload).unwrap(), 7);
    }

    #[test]
    fn push_event_is_rejected() {
        let payload = r#"{ "ref": "refs/heads/main", "commits": [] }"#;
        let err = pr_number_from_event(payload).unwrap_err();
        assert!(matches!(err, MentorError::Event(_)));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = pr_number_from_event("{not json").unwrap_err();
        assert!(matches!(err, MentorError::Serialization(_)));
    }

    #[test]
    fn non_numeric_pr_number_is_rejected() {
        let payload = r#"{ "pull_request": { "number": "seven" } }"#;
        assert!(pr_number_from_event(payload).is_err());
    }

    #[test]
    fn reads_payload_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(&path, r#"{ "pull_request": { "number": 12 } }"#).unwrap();
        assert_eq!(pr_number_from_event_file(&path).unwrap(), 12);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = pr_number_from_event_file(Path::new("/nonexistent/event.json")).unwrap_err();
        assert!(matches!(err, MentorError::Io(_)));
    }
}
