//! CLI for the Issue Mover.
//!
//! Moves issues, with their comments, from one GitHub repository to another
//! and closes the originals.

use clap::Parser;
use issue_mover::{
    GitHubTracker, MigrationConfig, Migrator, MoveError, MoverFile, MoverOptions, RepoRef,
    RunSummary, StateFilter, TemplateRenderer,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issue Mover - Move issues and their comments between GitHub repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Repository to move issues out of, as owner/name.
    source: Option<RepoRef>,

    /// Repository to move issues into, as owner/name.
    target: Option<RepoRef>,

    /// Which source issues to move: open, closed or all.
    #[arg(long)]
    state: Option<StateFilter>,

    /// Only move issues carrying this label. Repeat for an any-of match.
    #[arg(long = "label", value_name = "LABEL")]
    labels: Vec<String>,

    /// Pause before each issue and comment, in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Items requested per list page (1-100).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    per_page: Option<u8>,

    /// List the issues that would be moved without changing anything.
    #[arg(long)]
    dry_run: bool,

    /// Path to an issue-mover.toml config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    // rustls needs a process-wide crypto provider; an error means one is already installed
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::from(0)
        }
        Err(e) if e.is_config() => {
            error!(error = %e, "Invalid configuration");
            ExitCode::from(2)
        }
        Err(e) => {
            error!(error = %e, "Move aborted");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, MoveError> {
    let file = match &args.config {
        Some(path) => MoverFile::load(path)?,
        None => MoverFile::default(),
    };

    let (config, options) = merge_config(&args, &file)?;
    let renderer = TemplateRenderer::with_templates(&file.templates)?;
    let tracker = GitHubTracker::new(args.token)?;

    let mut migrator = Migrator::new(tracker)?
        .with_options(options)
        .with_renderer(renderer);
    migrator.set_config(config);

    migrator.move_issues().await
}

/// Applies command line flags on top of the config file.
fn merge_config(
    args: &Args,
    file: &MoverFile,
) -> Result<(MigrationConfig, MoverOptions), issue_mover::ConfigError> {
    let merged = MoverFile {
        source: args.source.clone().or_else(|| file.source.clone()),
        target: args.target.clone().or_else(|| file.target.clone()),
        state: args.state.or(file.state),
        labels: if args.labels.is_empty() {
            file.labels.clone()
        } else {
            args.labels.clone()
        },
        delay_ms: args.delay_ms.or(file.delay_ms),
        per_page: args.per_page.or(file.per_page),
        dry_run: args.dry_run || file.dry_run,
        templates: file.templates.clone(),
    };

    merged.validate("command line")?;
    Ok((merged.migration_config()?, merged.options()))
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Issues found: {}", summary.issues_found);
    println!("  Issues skipped: {}", summary.issues_skipped);

    if summary.dry_run {
        println!("  Issues that would move: {}", summary.issues_planned);
    } else {
        println!("  Issues moved: {}", summary.issues_moved);
        println!("  Comments copied: {}", summary.comments_copied);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["issue-mover", "--token", "t"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn flags_override_file() {
        let args = parse(&["a/b", "c/d", "--state", "all", "--label", "bug", "--delay-ms", "0"]);
        let file = MoverFile {
            source: Some(RepoRef::new("x", "y")),
            state: Some(StateFilter::Closed),
            labels: vec!["ui".to_string()],
            delay_ms: Some(900),
            per_page: Some(20),
            ..Default::default()
        };

        let (config, options) = merge_config(&args, &file).unwrap();

        assert_eq!(config.source, RepoRef::new("a", "b"));
        assert_eq!(config.target, RepoRef::new("c", "d"));
        assert_eq!(config.state, StateFilter::All);
        assert_eq!(config.label_filter.unwrap().iter().collect::<Vec<_>>(), vec!["bug"]);
        assert_eq!(options.delay(), Duration::ZERO);
        assert_eq!(options.per_page(), 20);
    }

    #[test]
    fn missing_target_is_config_error() {
        let args = parse(&["a/b"]);

        let result = merge_config(&args, &MoverFile::default());

        assert!(matches!(
            result,
            Err(issue_mover::ConfigError::MissingRepositories)
        ));
    }

    #[test]
    fn same_source_and_target_is_rejected() {
        let args = parse(&["a/b", "a/b"]);

        let result = merge_config(&args, &MoverFile::default());

        assert!(matches!(
            result,
            Err(issue_mover::ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn flag_target_matching_file_source_is_rejected() {
        let args = parse(&["--label", "bug"]);
        let file = MoverFile {
            source: Some(RepoRef::new("a", "b")),
            target: Some(RepoRef::new("a", "b")),
            ..Default::default()
        };

        let result = merge_config(&args, &file);

        assert!(matches!(
            result,
            Err(issue_mover::ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn blank_label_is_rejected() {
        let args = parse(&["a/b", "c/d", "--label", " "]);

        let result = merge_config(&args, &MoverFile::default());

        assert!(matches!(
            result,
            Err(issue_mover::ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn rejects_malformed_repository() {
        let result = Args::try_parse_from(["issue-mover", "--token", "t", "nope", "c/d"]);
        assert!(result.is_err());
    }
}
