//! Command-line front end for the `tidyui` binary.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::analyzer::output::{
    DEFAULT_REPORT_PATH, console_summary, render_json, write_json, write_report,
};
use crate::analyzer::runner::analyze;
use crate::config::TidyConfig;
use crate::progress::{self, Spinner};

/// Exit code for `--fail-on-issues` when the report is not clean.
const ISSUES_EXIT_CODE: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "tidyui")]
#[command(about = "Find duplicate components, hardcoded styles, copy-pasted JSX and dead components")]
#[command(version)]
pub struct Args {
    /// Directory to scan
    #[arg(default_value = "src")]
    pub root: PathBuf,

    /// Where to write the Markdown report
    #[arg(short, long, default_value = DEFAULT_REPORT_PATH)]
    pub output: PathBuf,

    /// Print the report as JSON to stdout
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON report to this file
    #[arg(long, value_name = "PATH")]
    pub json_output: Option<PathBuf>,

    /// Config file (default: <ROOT>/.tidyui/config.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Worker threads for reading and parsing (default: all cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// No spinner, no console summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Exit with status 1 when any issue is found
    #[arg(long)]
    pub fail_on_issues: bool,
}

fn init_tracing(level: &str) {
    // A second init (tests calling run_with twice) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.parse().unwrap_or_default()),
        )
        .try_init();
}

fn load_config(args: &Args) -> Result<TidyConfig> {
    let mut config = match &args.config {
        Some(path) => TidyConfig::load_explicit(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TidyConfig::load(&args.root),
    };
    if let Some(threads) = args.threads {
        config.scan.threads = threads;
    }
    Ok(config)
}

pub fn run() -> Result<ExitCode> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> Result<ExitCode> {
    init_tracing(&args.log_level);
    let config = load_config(&args)?;
    debug!("effective config: {:?}", config);

    let started = Instant::now();
    let spinner = if args.quiet || args.json {
        Spinner::hidden()
    } else {
        Spinner::new(&format!("Scanning {}", args.root.display()))
    };

    let report = match analyze(&args.root, &config) {
        Ok(report) => report,
        Err(err) => {
            spinner.finish_error("Scan failed");
            return Err(err).context("scan aborted");
        }
    };
    spinner.finish_success(&format!(
        "Scan finished in {}",
        progress::format_duration(started.elapsed())
    ));

    write_report(&args.output, &report)?;
    if let Some(path) = &args.json_output {
        write_json(path, &report)?;
    }

    if args.json {
        println!("{}", render_json(&report));
    } else if !args.quiet {
        for line in console_summary(&report) {
            println!("{line}");
        }
        progress::success(&format!("Report → {}", args.output.display()));
        if let Some(path) = &args.json_output {
            progress::info(&format!("JSON → {}", path.display()));
        }
        if report.summary.parse_failures > 0 {
            progress::warning(&format!(
                "{} could not be parsed",
                progress::format_count(report.summary.parse_failures, "file", "files")
            ));
        }
    }

    if args.fail_on_issues && report.has_issues() {
        return Ok(ExitCode::from(ISSUES_EXIT_CODE));
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_cli() {
        let args = Args::try_parse_from(["tidyui"]).expect("parses");
        assert_eq!(args.root, PathBuf::from("src"));
        assert_eq!(args.output, PathBuf::from("component-analysis-report.md"));
        assert!(!args.json);
        assert!(!args.fail_on_issues);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn flags_parse() {
        let args = Args::try_parse_from([
            "tidyui",
            "app/src",
            "-o",
            "out.md",
            "--json",
            "--json-output",
            "out.json",
            "--threads",
            "2",
            "--quiet",
            "--fail-on-issues",
        ])
        .expect("parses");
        assert_eq!(args.root, PathBuf::from("app/src"));
        assert_eq!(args.output, PathBuf::from("out.md"));
        assert_eq!(args.json_output, Some(PathBuf::from("out.json")));
        assert_eq!(args.threads, Some(2));
        assert!(args.quiet && args.json && args.fail_on_issues);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let args = Args::try_parse_from(["tidyui", "--config", "/definitely/not/here.toml"])
            .expect("parses");
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn threads_flag_overrides_config() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let root = tmp.path().to_string_lossy().to_string();
        let args = Args::try_parse_from(["tidyui", root.as_str(), "--threads", "3"]).expect("parses");
        let config = load_config(&args).expect("config");
        assert_eq!(config.scan.threads, 3);
    }
}
