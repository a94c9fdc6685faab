//! Changed-file filtering to keep review context focused on student code.
//!
//! Drops build artifacts, dependency directories, and anything outside the
//! front-end source extensions before the diff reaches the model, keeping
//! the prompt small and on-topic.

use std::path::Path;

use mentor_core::FilterConfig;

/// Directory names whose contents are never reviewed.
///
/// Shared with the task-context loader, which prunes these before
/// descending.
pub const IGNORE_DIRS: &[&str] = &[
    ".git",
    ".github",
    ".vscode",
    ".idea",
    "node_modules",
    "bower_components",
    "dist",
    "build",
    "out",
    "coverage",
    "__pycache__",
    "venv",
    "bin",
    "obj",
    ".next",
    ".nuxt",
    ".astro",
];

/// File extensions (without the dot) eligible for review.
const ALLOW_EXTENSIONS: &[&str] = &[
    // JavaScript / TypeScript and flavors
    "js", "jsx", "ts", "tsx", "mjs", "cjs",
    // Component frameworks
    "vue", "svelte", "astro",
    // Styling
    "css", "scss", "sass", "less", "styl",
    // Markup and templates
    "html", "htm", "pug", "ejs", "handlebars", "hbs",
    // Backend and docs, for full-stack exercises
    "json", "go", "java", "cpp", "c", "md",
];

/// Decides whether a changed file belongs in the review context.
///
/// The built-in denylist and allowlist always apply; configuration can only
/// add to them. Directory matching is segment-exact: `bin/app.js` is
/// ignored, `bin-utils/app.js` is not.
///
/// # Examples
///
/// ```
/// use mentor_review::filter::FileFilter;
///
/// let filter = FileFilter::default_filter();
/// assert!(filter.should_ignore("dist/bundle.js"));
/// assert!(!filter.should_ignore("index.html"));
/// ```
pub struct FileFilter {
    extra_ignore_dirs: Vec<String>,
    extra_extensions: Vec<String>,
    skip_patterns: Vec<glob::Pattern>,
}

impl FileFilter {
    /// Create a filter with the built-in lists only.
    ///
    /// # Examples
    ///
    /// ```
    /// use mentor_review::filter::FileFilter;
    ///
    /// let filter = FileFilter::default_filter();
    /// assert!(filter.should_ignore("node_modules/react/index.js"));
    /// ```
    pub fn default_filter() -> Self {
        Self {
            extra_ignore_dirs: Vec::new(),
            extra_extensions: Vec::new(),
            skip_patterns: Vec::new(),
        }
    }

    /// Create a filter extended by configuration.
    ///
    /// Invalid glob patterns are dropped silently.
    ///
    /// # Examples
    ///
    /// ```
    /// use mentor_core::FilterConfig;
    /// use mentor_review::filter::FileFilter;
    ///
    /// let config = FilterConfig {
    ///     ignore_dirs: vec!["target".into()],
    ///     allow_extensions: vec!["py".into()],
    ///     skip_patterns: vec!["*.min.js".into()],
    /// };
    /// let filter = FileFilter::from_config(&config);
    /// assert!(filter.should_ignore("target/app.js"));
    /// assert!(!filter.should_ignore("src/main.py"));
    /// assert!(filter.should_ignore("vendor.min.js"));
    /// ```
    pub fn from_config(config: &FilterConfig) -> Self {
        let mut skip_patterns = Vec::new();
        for pat in &config.skip_patterns {
            if let Ok(p) = glob::Pattern::new(pat) {
                skip_patterns.push(p);
            }
        }

        Self {
            extra_ignore_dirs: config.ignore_dirs.clone(),
            extra_extensions: config.allow_extensions.clone(),
            skip_patterns,
        }
    }

    /// Check whether `path` should be excluded from review context.
    ///
    /// Evaluated in order: denylisted directory segment, then extension
    /// allowlist (no extension means ignore), then configured skip globs.
    pub fn should_ignore(&self, path: &str) -> bool {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let Some(file_name) = segments.next_back() else {
            return true;
        };

        for dir in segments {
            if self.is_ignored_dir(dir) {
                return true;
            }
        }

        let Some(ext) = Path::new(file_name).extension().and_then(|e| e.to_str()) else {
            return true;
        };
        let allowed = ALLOW_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext))
            || self
                .extra_extensions
                .iter()
                .any(|a| a.eq_ignore_ascii_case(ext));
        if !allowed {
            return true;
        }

        self.skip_patterns.iter().any(|p| p.matches(path))
    }

    fn is_ignored_dir(&self, segment: &str) -> bool {
        IGNORE_DIRS.contains(&segment) || self.extra_ignore_dirs.iter().any(|d| d == segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_allowlisted_source_files() {
        let filter = FileFilter::default_filter();
        for path in [
            "index.html",
            "styles/main.css",
            "src/app.ts",
            "src/components/Form.vue",
            "README.md",
        ] {
            assert!(!filter.should_ignore(path), "should keep {path}");
        }
    }

    #[test]
    fn ignores_denylisted_directories() {
        let filter = FileFilter::default_filter();
        for path in [
            "dist/bundle.js",
            "node_modules/react/index.js",
            "src/node_modules/x.js",
            ".github/workflows/ci.html",
            "coverage/lcov-report/index.html",
        ] {
            assert!(filter.should_ignore(path), "should ignore {path}");
        }
    }

    #[test]
    fn directory_matching_is_segment_exact() {
        let filter = FileFilter::default_filter();
        // "bin-utils" contains "bin" but is a different directory
        assert!(!filter.should_ignore("bin-utils/app.js"));
        assert!(filter.should_ignore("bin/app.js"));
        // nested denylisted segment, anywhere in the path
        assert!(filter.should_ignore("src/obj/model.js"));
    }

    #[test]
    fn file_named_like_ignored_dir_is_judged_by_extension() {
        let filter = FileFilter::default_filter();
        // the final component is a file name, not a directory
        assert!(filter.should_ignore("bin"));
        assert!(!filter.should_ignore("src/bin.js"));
    }

    #[test]
    fn ignores_unknown_or_missing_extensions() {
        let filter = FileFilter::default_filter();
        assert!(filter.should_ignore("Makefile"));
        assert!(filter.should_ignore("app.rs"));
        assert!(filter.should_ignore("logo.png"));
        assert!(filter.should_ignore("archive.tar.gz"));
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        let filter = FileFilter::default_filter();
        assert!(!filter.should_ignore("Index.HTML"));
        assert!(!filter.should_ignore("style.CSS"));
    }

    #[test]
    fn config_extends_denylist_and_allowlist() {
        let config = mentor_core::FilterConfig {
            ignore_dirs: vec!["storybook-static".into()],
            allow_extensions: vec!["py".into()],
            skip_patterns: Vec::new(),
        };
        let filter = FileFilter::from_config(&config);
        assert!(filter.should_ignore("storybook-static/index.html"));
        assert!(!filter.should_ignore("scripts/train.py"));
        // built-ins still apply
        assert!(filter.should_ignore("dist/bundle.js"));
        assert!(!filter.should_ignore("index.html"));
    }

    #[test]
    fn skip_patterns_override_allowed_extensions() {
        let config = mentor_core::FilterConfig {
            ignore_dirs: Vec::new(),
            allow_extensions: Vec::new(),
            skip_patterns: vec!["*.min.js".into(), "fixtures/**".into()],
        };
        let filter = FileFilter::from_config(&config);
        assert!(filter.should_ignore("vendor.min.js"));
        assert!(filter.should_ignore("fixtures/sample.html"));
        assert!(!filter.should_ignore("src/app.js"));
    }

    #[test]
    fn invalid_glob_patterns_are_dropped() {
        let config = mentor_core::FilterConfig {
            ignore_dirs: Vec::new(),
            allow_extensions: Vec::new(),
            skip_patterns: vec!["[".into()],
        };
        let filter = FileFilter::from_config(&config);
        assert!(!filter.should_ignore("src/app.js"));
    }
}
