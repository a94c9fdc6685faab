//! Mentoring prompt construction.
//!
//! The prompt is a fixed instructional template with three substitution
//! points: the task description, the rendered per-commit diff section, and
//! a static catalog of learning resources. The output-format contract and
//! the worked example are advisory; the model's reply is posted as-is.

use std::fmt::Write;

use mentor_core::ChangedFile;

/// Curated learning resources the model is told to recommend from.
pub const LEARNING_RESOURCES: &str = "\
**HTML & Semantic Markup:**
- MDN HTML Basics: https://developer.mozilla.org/en-US/docs/Learn/HTML
- Web.dev Learn HTML: https://web.dev/learn/html

**CSS & Styling:**
- CSS-Tricks Complete Guide: https://css-tricks.com/guides/
- MDN CSS Layout: https://developer.mozilla.org/en-US/docs/Learn/CSS/CSS_layout
- Flexbox Froggy (Game): https://flexboxfroggy.com/
- Grid Garden (Game): https://cssgridgarden.com/

**JavaScript Basics:**
- JavaScript.info: https://javascript.info/
- MDN JavaScript Guide: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Guide
- Eloquent JavaScript (Free Book): https://eloquentjavascript.net/

**Forms & Validation:**
- MDN Forms Guide: https://developer.mozilla.org/en-US/docs/Learn/Forms
- Web.dev Sign-in Form Best Practices: https://web.dev/sign-in-form-best-practices/

**Accessibility:**
- Web.dev Learn Accessibility: https://web.dev/learn/accessibility
- A11y Project Checklist: https://www.a11yproject.com/checklist/

**General Best Practices:**
- Web.dev Learn: https://web.dev/learn
- Frontend Checklist: https://frontendchecklist.io/
";

/// Fallback used when no task-description file was found.
const NO_TASK_FALLBACK: &str =
    "No task description was found. Review the code against general best practices.";

/// Render the diff section for one commit.
///
/// Emits, per file, a header line naming the file, its change status, and
/// the raw patch text, in the order the API returned them. Callers pass
/// only files that survived the filter and carry patch text.
///
/// # Examples
///
/// ```
/// use mentor_core::{ChangedFile, FileStatus};
/// use mentor_review::prompt::render_changed_files;
///
/// let file = ChangedFile {
///     filename: "index.html".into(),
///     status: FileStatus::Modified,
///     patch: Some("+<label>Email</label>".into()),
/// };
/// let section = render_changed_files(&[&file]);
/// assert!(section.contains("--- FILE: index.html ---"));
/// assert!(section.contains("Status: modified"));
/// assert!(section.contains("+<label>Email</label>"));
/// ```
pub fn render_changed_files(files: &[&ChangedFile]) -> String {
    let mut section = String::new();
    for file in files {
        let Some(patch) = &file.patch else { continue };
        let _ = write!(
            section,
            "\n--- FILE: {} ---\nStatus: {}\nChanges:\n{}\n",
            file.filename, file.status, patch
        );
    }
    section
}

/// Build the full mentoring prompt for one commit.
///
/// # Examples
///
/// ```
/// use mentor_review::prompt::build_prompt;
///
/// let prompt = build_prompt(Some("Build a sign-up form."), "+<form>");
/// assert!(prompt.contains("Build a sign-up form."));
/// assert!(prompt.contains("+<form>"));
/// ```
pub fn build_prompt(task_context: Option<&str>, changes: &str) -> String {
    let task = match task_context {
        Some(t) if !t.trim().is_empty() => t,
        _ => NO_TASK_FALLBACK,
    };

    format!(
        "\
# Your role and context
You are an experienced front-end developer mentoring **beginner front-end students**.
Your main goal is not just pointing out mistakes, but making learning easier and keeping motivation up.

# Task context
{task}

# Changes made in this commit
{changes}

# Your tasks (in this exact order)

## Step 1: Assess the student's level
- Judge the complexity and style of the code
- Estimate the student's likely knowledge level (absolute beginner / beginner / intermediate beginner)
- Match your language to that level
- Beginner = simple language, more explanation; experienced = more technical

## Step 2: Identify the focus
- What is the student learning in this commit? (HTML structure? CSS styling? JavaScript basics? Forms?)
- Which concepts or technologies did they use?
- What is their strength? What needs improvement?

## Step 3: Give feedback (short and concrete)

**Important rules:**
- **Be concise**: at most 5 sentences
- **Stay focused**: only on this commit's changes
- **Start with a positive**: always find something good first (it builds motivation)
- **Be specific**: if something should change, point to the exact line and how
- **Explain why**: never just \"this is bad\"; explain what problem it causes
- **For beginners**: avoid heavy jargon, or add a simple explanation

## Step 4: Recommend resources
Based on the identified level and concepts:
- Suggest **1-2 concrete resources** (MDN docs, web.dev, CSS-Tricks, JavaScript.info)
- The resource must be **directly related** to the topic the student is working on

# Output format (follow it strictly)

\u{2705} **What works well**
[1 sentence - always find something positive, however small]

\u{1f4a1} **Suggestions**
\u{2022} [concrete suggestion 1 - name the file and what to change]
\u{2022} [concrete suggestion 2 - explain why]
[at most 3 bullet points]

\u{1f4da} **Resource for the next step**
[1-2 concrete links or recommendations that deepen exactly the concept being practiced]

# Available resource catalog
{resources}

---

# Example of an ideal answer

\u{2705} **What works well**
Good use of semantic HTML's `<form>` and `<label>` tags - this improves accessibility.

\u{1f4a1} **Suggestions**
\u{2022} In `index.html`, line 15: add `type=\"submit\"` to the `<button>` element (submit is the default, but state it explicitly)
\u{2022} In `styles.css`, make class names descriptive: `.btn-1` -> `.submit-button` (in 6 months nobody remembers what btn-1 means)

\u{1f4da} **Resource for the next step**
\u{2022} MDN - HTML Forms Guide: https://developer.mozilla.org/en-US/docs/Learn/Forms

---

**Begin the review:**
",
        task = task,
        changes = changes,
        resources = LEARNING_RESOURCES,
    )
}
