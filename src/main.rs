//! tweet-purge - rate-limited batch deletion of tweets
//!
//! Reads ids (or status URLs) from a file or stdin and deletes them in
//! capped waves, backing off whenever the API answers 429.

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tweet_purge::config::LogFormat;
use tweet_purge::utils::logging::init_logging;
use tweet_purge::{
    Config, ExecutionEvent, ExecutionReport, LONG_VERSION, Outcome, SchedulerState, build_info,
    parse_id_list, scheduler_from_config,
};

/// Exit code reported when the run was cancelled
const EXIT_ABORTED: u8 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "tweet-purge", version, long_version = LONG_VERSION, about)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "TWEET_PURGE_CONFIG")]
    config: Option<PathBuf>,

    /// File with one id or status URL per line, or a JSON array; `-` reads stdin
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Maximum requests per wave
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// Bearer token
    #[arg(long, conflicts_with = "script_url")]
    token: Option<String>,

    /// Script to scrape the bearer token from
    #[arg(long)]
    script_url: Option<String>,

    /// Raw cookie header, e.g. `ct0=...; auth_token=...`
    #[arg(long)]
    cookies: Option<String>,

    /// Deletion endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Final report format on stdout
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,

    /// Log output format
    #[arg(long)]
    log_format: Option<LogFormat>,
}

impl Cli {
    /// Layer command line flags over the loaded configuration
    fn apply(&self, config: &mut Config) {
        let purge = &mut config.purge;
        if let Some(max_concurrent) = self.max_concurrent {
            purge.executor.max_concurrent = max_concurrent;
        }
        if let Some(token) = &self.token {
            purge.credentials.token = Some(token.clone());
        }
        if let Some(script_url) = &self.script_url {
            purge.credentials.token = None;
            purge.credentials.script_url = Some(script_url.clone());
        }
        if let Some(cookies) = &self.cookies {
            purge.credentials.cookies = Some(cookies.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            purge.endpoint.url = endpoint.clone();
        }
        if let Some(format) = self.log_format {
            purge.logging.format = format;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(SchedulerState::Done) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_ABORTED),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<SchedulerState> {
    let mut config = Config::load(cli.config.as_deref())
        .await
        .context("failed to load configuration")?;
    cli.apply(&mut config);
    config.validate()?;

    init_logging(config.logging())?;
    let build = build_info();
    debug!(
        version = build.version,
        commit = build.git_hash,
        rustc = build.rust_version,
        "starting"
    );

    let ids = read_ids(&cli.input).await?;
    info!(count = ids.len(), "ids loaded");

    let (tx, rx) = mpsc::unbounded_channel();
    let scheduler = scheduler_from_config(&config)?.with_events(tx);

    let handle = scheduler.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    let display = tokio::spawn(render_events(rx));
    let outcome = scheduler.submit(ids).await;
    drop(scheduler);
    if let Err(e) = display.await {
        warn!("status display stopped: {}", e);
    }

    let report = outcome?;
    print_report(&report, cli.report)?;
    Ok(report.state)
}

async fn read_ids(input: &str) -> anyhow::Result<Vec<String>> {
    let text = if input == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("failed to read ids from stdin")?;
        text
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("failed to read ids from {}", input))?
    };

    Ok(parse_id_list(&text)?)
}

/// Print status texts to stderr until the scheduler goes away
async fn render_events(mut rx: mpsc::UnboundedReceiver<ExecutionEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            ExecutionEvent::Status(text) => eprintln!("{}\n", text),
            ExecutionEvent::StateChanged(state) => debug!(state = %state, "state changed"),
            ExecutionEvent::Finished(state) => debug!(state = %state, "execution finished"),
            ExecutionEvent::Progress(_) => {}
        }
    }
}

fn print_report(report: &ExecutionReport, format: ReportFormat) -> anyhow::Result<()> {
    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        ReportFormat::Text => print!("{}", render_text_report(report)),
    }
    Ok(())
}

fn render_text_report(report: &ExecutionReport) -> String {
    let mut text = format!(
        "execution: {}\nstate: {}\ntotal: {}\nwaves: {}\nbackoff cycles: {}\n",
        report.execution_id, report.state, report.total, report.waves, report.backoff_cycles
    );

    for (label, outcome) in [
        ("deleted", Outcome::Success),
        ("client errors", Outcome::ClientError),
        ("server errors", Outcome::ServerError),
        ("unexpected", Outcome::Unexpected),
        ("network errors", Outcome::NetworkError),
    ] {
        let count = report.count(outcome);
        if count > 0 {
            text.push_str(&format!("{}: {}\n", label, count));
        }
    }

    for record in report.results.iter().filter(|r| !r.outcome.is_success()) {
        let status = record
            .status
            .map(|code| code.to_string())
            .unwrap_or_else(|| "network error".to_string());
        text.push_str(&format!("  {} -> {}\n", record.id, status));
    }

    if !report.unresolved.is_empty() {
        text.push_str(&format!("unresolved: {}\n", report.unresolved.len()));
        for id in &report.unresolved {
            text.push_str(&format!("  {}\n", id));
        }
    }

    text
}
