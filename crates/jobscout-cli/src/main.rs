//! `jobscout`: sign in, collect posting IDs for a search, scrape each posting.

mod phases;
mod prompt;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use clap::Parser;
use jobscout_auth::{login, Credentials};
use jobscout_browser::{BrowserActions, BrowserEngine, BrowserError, LaunchOptions};
use jobscout_core::AppConfig;
use jobscout_scanner::{login_url, ScanSettings, SiteDefinition};
use prompt::Prompter;
use std::future::Future;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "jobscout",
    version,
    about = "Scrape job postings: collect posting IDs for a search, then each posting's details"
)]
struct Args {
    /// Path to the Chrome/Chromium executable
    #[arg(short = 'c', long = "chrome", value_name = "PATH")]
    chrome: Option<PathBuf>,

    /// Test mode: read IDs from the test identifier file and only write the
    /// test record file
    #[arg(short, long)]
    test: bool,

    /// Scrape posting IDs for a new search into a timestamped file
    #[arg(long)]
    id: bool,

    /// Scrape posting details for the most recent identifier file
    #[arg(long)]
    info: bool,

    /// Prompt for the username and password instead of reading the credential file
    #[arg(long)]
    manual_login: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Search keywords (prompted when absent)
    #[arg(long)]
    keywords: Option<String>,

    /// Search location (prompted when absent)
    #[arg(long)]
    location: Option<String>,

    /// Number of result pages to scrape, 0 for all (prompted when absent)
    #[arg(long)]
    pages: Option<u32>,

    /// Answer yes to confirmation prompts
    #[arg(short, long)]
    yes: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize tracing subscriber for logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose {
        "info,jobscout=debug"
    } else {
        "warn,jobscout=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    info!("Starting jobscout v{}", env!("CARGO_PKG_VERSION"));

    let mut config =
        AppConfig::load_with_env(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(chrome) = &args.chrome {
        config.browser.executable = Some(chrome.clone());
    }

    if !args.id && !args.info {
        println!("Nothing to do: pass --id to scrape posting IDs and/or --info to scrape posting details.");
        return Ok(());
    }

    let site = SiteDefinition::load_or_default(config.scraping.site_definition.as_deref())
        .context("failed to load site definition")?;

    let launch = LaunchOptions::from_config(&config.browser)
        .with_poll_interval(config.scraping.poll_interval());
    launch
        .check_executable()
        .context("Chrome executable not found; pass --chrome <PATH> or set JOBSCOUT_CHROME")?;

    let prompter = Prompter::new(args.yes);
    let credentials = if args.manual_login {
        prompter.credentials()?
    } else {
        Credentials::from_file(&config.paths.credentials_file)?
    };

    let engine = BrowserEngine::launch(launch)
        .await
        .context("failed to start the browser")?;

    let outcome = run(&engine, &site, &config, &args, &prompter, &credentials).await;
    close_after(outcome, engine.close()).await?;
    println!("DONE");
    Ok(())
}

/// Close the session, then hand back the run's outcome unchanged.
async fn close_after<C>(outcome: Result<()>, close: C) -> Result<()>
where
    C: Future<Output = Result<(), BrowserError>>,
{
    println!("{}", "-".repeat(30));
    if let Err(e) = close.await {
        warn!(error = %e, "Browser did not shut down cleanly");
    }
    println!("Driver closed.");
    outcome
}

/// Everything between launching and closing the browser.
async fn run<B: BrowserActions + ?Sized>(
    engine: &B,
    site: &SiteDefinition,
    config: &AppConfig,
    args: &Args,
    prompter: &Prompter,
    credentials: &Credentials,
) -> Result<()> {
    println!("Logging in...");
    login(
        engine,
        credentials,
        &login_url(site),
        &site.login,
        config.scraping.wait_timeout(),
    )
    .await
    .context("login failed")?;
    println!("Login successful.");

    let settings = ScanSettings::from(&config.scraping);

    if args.id {
        let query = prompter.search_query(
            args.keywords.as_deref(),
            args.location.as_deref(),
            args.pages,
        )?;
        phases::scrape_ids(engine, site, config, &settings, &query, args.test).await?;
    }

    if args.info {
        phases::scrape_info(engine, site, config, &settings, prompter, args.test).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::OfflineBrowser;
    use clap::CommandFactory;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let args = Args::try_parse_from([
            "jobscout",
            "-c",
            "/usr/bin/chromium",
            "-t",
            "--id",
            "--info",
            "--manual-login",
        ])
        .expect("parse flags");

        assert_eq!(args.chrome, Some(PathBuf::from("/usr/bin/chromium")));
        assert!(args.test);
        assert!(args.id);
        assert!(args.info);
        assert!(args.manual_login);
        assert!(!args.yes);
    }

    #[test]
    fn test_search_flags() {
        let args = Args::try_parse_from([
            "jobscout",
            "--id",
            "--keywords",
            "rust developer",
            "--location",
            "Berlin",
            "--pages",
            "3",
            "--yes",
        ])
        .expect("parse flags");

        assert_eq!(args.keywords.as_deref(), Some("rust developer"));
        assert_eq!(args.location.as_deref(), Some("Berlin"));
        assert_eq!(args.pages, Some(3));
        assert!(args.yes);
    }

    #[test]
    fn test_pages_must_be_integer() {
        assert!(Args::try_parse_from(["jobscout", "--pages", "two"]).is_err());
    }

    #[tokio::test]
    async fn test_session_closed_when_phase_fails() {
        let tmp = TempDir::new().expect("create temp dir");
        let mut config = AppConfig::default();
        config.paths.id_dir = tmp.path().join("job_id_dir");
        config.paths.info_dir = tmp.path().join("job_info_dir");
        let args = Args::try_parse_from(["jobscout", "--info", "--yes"]).expect("parse flags");
        let browser = OfflineBrowser::default();
        let credentials = Credentials::new("me@example.com", "hunter2").expect("valid credentials");

        // No identifier files yet, so the info phase fails after login
        let outcome = run(
            &browser,
            &SiteDefinition::default(),
            &config,
            &args,
            &Prompter::new(true),
            &credentials,
        )
        .await;
        assert!(outcome.is_err());
        assert_eq!(browser.visited().len(), 1, "only the login page was visited");

        let closed = AtomicBool::new(false);
        let result = close_after(outcome, async {
            closed.store(true, Ordering::SeqCst);
            Ok::<(), BrowserError>(())
        })
        .await;

        assert!(closed.load(Ordering::SeqCst));
        let err = result.expect_err("phase failure is still reported");
        assert!(format!("{err:#}").contains("run with --id first"));
    }

    #[tokio::test]
    async fn test_close_failure_does_not_mask_success() {
        let result = close_after(Ok(()), async {
            Err(BrowserError::ChromiumError("already gone".to_string()))
        })
        .await;
        assert!(result.is_ok());
    }
}
