use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_log_json::cli::run_changelog_workflow;
use git_log_json::config::{self, Config, Order};
use git_log_json::git::GitCli;
use git_log_json::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-log-json",
    version,
    about = "Generate a JSON changelog of the commits introduced by each release tag"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Output file (default: changelog.json)")]
    dest: Option<PathBuf>,

    #[arg(long, help = "Use abbreviated commit hashes")]
    short_hash: bool,

    #[arg(short, long, help = "Only include tags matching this regular expression")]
    filter: Option<String>,

    #[arg(short, long, help = "Indent the JSON output")]
    pretty: bool,

    #[arg(long, help = "Tag order in the output: newest-first or oldest-first")]
    order: Option<Order>,

    #[arg(long, help = "Seconds to wait for each git command")]
    timeout: Option<u64>,

    #[arg(long, help = "Value passed to git log --date (e.g. iso, short)")]
    date_format: Option<String>,

    #[arg(long, help = "Repository path (default: current directory)")]
    repo: Option<PathBuf>,

    #[arg(short, long, help = "Show debug logging")]
    verbose: bool,
}

impl Args {
    /// Command-line values win over the configuration file
    fn apply(self, mut config: Config) -> Config {
        if let Some(dest) = self.dest {
            config.dest = dest;
        }
        if self.short_hash {
            config.short_hash = true;
        }
        if let Some(filter) = self.filter {
            config.filter = Some(filter);
        }
        if self.pretty {
            config.pretty = true;
        }
        if let Some(order) = self.order {
            config.order = order;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(date_format) = self.date_format {
            config.date_format = Some(date_format);
        }
        if let Some(repo) = self.repo {
            config.repo = repo;
        }
        config
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => args.apply(cfg),
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    let git = match GitCli::open(&config.repo, config.timeout()) {
        Ok(git) => git.with_date_format(config.date_format.clone()),
        Err(e) if e.is_prerequisite() => {
            ui::display_error(&e.to_string());
            ui::display_error("git-log-json needs the git executable and a repository to read");
            std::process::exit(1);
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    ui::display_status(&format!("Reading tags in {}", git.workdir().display()));

    let outcome = match run_changelog_workflow(&git, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            ui::display_error(&e.to_string());
            ui::display_error(&format!("{} was not written", config.dest.display()));
            std::process::exit(1);
        }
    };

    for diagnostic in &outcome.diagnostics {
        ui::display_diagnostic(diagnostic);
    }
    ui::display_changelog_summary(&outcome.changelog, &config.dest);

    Ok(())
}
