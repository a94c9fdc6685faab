use std::path::{Path, PathBuf};

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

use mentor_core::{MentorConfig, MentorError};
use mentor_review::comment::{build_comment_body, publish_review, wrap_comment};
use mentor_review::context::load_task_context;
use mentor_review::event::pr_number_from_event_file;
use mentor_review::filter::FileFilter;
use mentor_review::github::{parse_repo, GitHubClient};
use mentor_review::llm::GeminiClient;
use mentor_review::pipeline::ReviewPipeline;

#[derive(Parser)]
#[command(
    name = "mentor",
    version,
    about = "AI mentor that reviews student pull requests commit by commit",
    long_about = "Mentor reviews each commit of a student's pull request with a \
                  generative model and posts one aggregated feedback comment.\n\n\
                  Intended to run inside a GitHub Actions pull_request workflow.\n\
                  Requires GEMINI_API_KEY and GITHUB_TOKEN; repository and pull \
                  request come from GITHUB_REPOSITORY and GITHUB_EVENT_PATH \
                  unless overridden.\n\n\
                  Examples:\n  \
                    mentor                          Review the triggering PR\n  \
                    mentor --repo school/repo --pr 42\n  \
                    mentor --dry-run                Print the comment instead of posting"
)]
struct Cli {
    /// Path to configuration file (default: .mentor.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Repository full name, owner/repo (default: $GITHUB_REPOSITORY)
    #[arg(long)]
    repo: Option<String>,

    /// Path to the event payload JSON (default: $GITHUB_EVENT_PATH)
    #[arg(long)]
    event: Option<PathBuf>,

    /// Pull request number (overrides the event payload)
    #[arg(long)]
    pr: Option<u64>,

    /// Working tree searched for the task description
    #[arg(long, default_value = ".")]
    workdir: PathBuf,

    /// Print the aggregated comment instead of posting it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MentorConfig::from_file(path).into_diagnostic()?,
        None => {
            let default_path = Path::new(".mentor.toml");
            if default_path.exists() {
                MentorConfig::from_file(default_path).into_diagnostic()?
            } else {
                MentorConfig::default()
            }
        }
    };

    // Fatal review conditions (missing secrets, non-PR event, commit list
    // fetch failure) end the run with a diagnostic but without a failure
    // exit code, so the surrounding workflow step stays green.
    if let Err(e) = run(&cli, &config).await {
        eprintln!("error: {e}");
    }
    Ok(())
}

async fn run(cli: &Cli, config: &MentorConfig) -> Result<(), MentorError> {
    // Secrets first; halt before any network call when either is missing.
    let model = GeminiClient::new(&config.llm)?;
    let github = GitHubClient::new(None)?;

    let repo = cli
        .repo
        .clone()
        .or_else(|| std::env::var("GITHUB_REPOSITORY").ok())
        .ok_or_else(|| {
            MentorError::Config("repository not set; pass --repo or set GITHUB_REPOSITORY".into())
        })?;
    parse_repo(&repo)?;

    let pr_number = match cli.pr {
        Some(n) => n,
        None => {
            let event_path = cli
                .event
                .clone()
                .or_else(|| std::env::var("GITHUB_EVENT_PATH").ok().map(PathBuf::from))
                .ok_or_else(|| {
                    MentorError::Event(
                        "event payload not set; pass --event/--pr or set GITHUB_EVENT_PATH".into(),
                    )
                })?;
            pr_number_from_event_file(&event_path)?
        }
    };

    let task_context = load_task_context(&cli.workdir, &config.filter);
    if task_context.is_none() {
        eprintln!("No task description found; reviewing against general best practices.");
    }

    eprintln!("Fetching commits from {repo}#{pr_number} ...");
    let pipeline = ReviewPipeline::new(github, model, FileFilter::from_config(&config.filter));
    let outcome = pipeline
        .run(&repo, pr_number, task_context.as_deref())
        .await?;
    eprint!("{outcome}");

    if cli.dry_run {
        if outcome.feedback.is_empty() {
            eprintln!("No feedback generated; nothing to post.");
        } else {
            println!("{}", wrap_comment(&build_comment_body(&outcome.feedback)));
        }
        return Ok(());
    }

    publish_review(pipeline.host(), &repo, pr_number, &outcome.feedback).await;
    Ok(())
}
