//! Locating the task-description file that anchors the mentoring prompt.

use std::path::Path;

use mentor_core::FilterConfig;
use tracing::{info, warn};

use crate::filter::IGNORE_DIRS;

/// Conventional task-description file names, matched case-insensitively.
const TASK_FILE_NAMES: &[&str] = &["readme.md", "task.md", "exercise.md", "assignment.md"];

/// Walk the working tree under `root` and read the first task-description
/// file found.
///
/// The walk is top-down, pruning denylisted directories (built-ins plus
/// `config.ignore_dirs`) before descending. Candidates are ordered by depth
/// first, then path, so a root-level `README.md` beats a nested one. A file
/// that cannot be read is logged and treated as not found; the next
/// candidate is tried.
///
/// # Examples
///
/// ```
/// use mentor_core::FilterConfig;
/// use mentor_review::context::load_task_context;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("TASK.md"), "Build a sign-up form.").unwrap();
/// let context = load_task_context(dir.path(), &FilterConfig::default());
/// assert_eq!(context.as_deref(), Some("Build a sign-up form."));
/// ```
pub fn load_task_context(root: &Path, config: &FilterConfig) -> Option<String> {
    let denylist: Vec<String> = IGNORE_DIRS
        .iter()
        .map(|d| (*d).to_string())
        .chain(config.ignore_dirs.iter().cloned())
        .collect();

    let walker = ignore::WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(std::ffi::OsStr::cmp)
        .filter_entry(move |entry| {
            if entry.file_type().is_some_and(|t| t.is_dir()) {
                let name = entry.file_name().to_string_lossy();
                return !denylist.iter().any(|d| d == name.as_ref());
            }
            true
        })
        .build();

    let mut candidates = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_lowercase();
        if TASK_FILE_NAMES.contains(&name.as_str()) {
            candidates.push(entry.into_path());
        }
    }
    candidates.sort_by_key(|p| (p.components().count(), p.clone()));

    for path in candidates {
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                info!(path = %path.display(), "found task description");
                return Some(content);
            }
            Err(e) => {
                warn!(path = %path.display(), "could not read task file: {e}");
            }
        }
    }

    None
}
