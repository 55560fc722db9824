//! The `--id` and `--info` phases of a run.

use crate::prompt::{print_header, print_success, print_warning, Prompter};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use jobscout_browser::BrowserActions;
use jobscout_core::{AppConfig, PathsConfig, SearchQuery};
use jobscout_scanner::idfile::{id_file_name, latest_id_files};
use jobscout_scanner::{
    harvest, read_id_file, record_file_path, write_id_file, write_records, ListingEnumerator,
    RecordExtractor, ScanSettings, SiteDefinition,
};
use std::path::{Path, PathBuf};

/// Enumerate the query's postings and write them to a new identifier file.
///
/// In test mode the test identifier file is read instead and nothing is written.
pub async fn scrape_ids<B: BrowserActions + ?Sized>(
    engine: &B,
    site: &SiteDefinition,
    config: &AppConfig,
    settings: &ScanSettings,
    query: &SearchQuery,
    test: bool,
) -> Result<()> {
    print_header("SCRAPING IDS");

    if test {
        let path = config.paths.test_id_path();
        let id_file = read_id_file(&path)?;
        println!(
            "Test mode: {} posting IDs read from {}",
            id_file.ids.len(),
            path.display()
        );
        return Ok(());
    }

    let progress = progress_bar("pages")?;
    let enumeration = ListingEnumerator::new(engine, site, settings.clone())?
        .enumerate_with_progress(query, |page, pages| {
            progress.set_length(u64::from(pages));
            progress.set_position(u64::from(page));
        })
        .await;
    progress.finish_and_clear();
    let enumeration = enumeration?;

    println!("DATE & TIME: {}", enumeration.scraped_at.display_stamp());
    println!(
        "Scraped {} page(s) out of {} total pages for {} jobs in {}",
        enumeration.pages_scraped,
        enumeration.total_pages,
        query.keyword(),
        query.location()
    );
    if enumeration.failures.is_empty() {
        print_success(&enumeration.summary());
    } else {
        print_warning(&enumeration.summary());
    }
    println!(">>> Found total {} unique jobs.", enumeration.ids.len());

    let path = config
        .paths
        .id_dir
        .join(id_file_name(&enumeration.scraped_at));
    let ids: Vec<_> = enumeration.ids.iter().copied().collect();
    write_id_file(&path, query, &ids)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!(
        "[{}] Updated job list at {}",
        enumeration.scraped_at.display_stamp(),
        path.display()
    );
    Ok(())
}

/// Extract a record for every posting of the most recent identifier file.
pub async fn scrape_info<B: BrowserActions + ?Sized>(
    engine: &B,
    site: &SiteDefinition,
    config: &AppConfig,
    settings: &ScanSettings,
    prompter: &Prompter,
    test: bool,
) -> Result<()> {
    print_header("SCRAPING INFO");

    let (id_path, recent) = select_id_file(&config.paths, test)?;
    println!("Most recent ID files");
    for path in &recent {
        println!("    {}", path.display());
    }

    let name = id_path
        .file_name()
        .map_or_else(|| id_path.display().to_string(), |n| n.to_string_lossy().into_owned());
    if !prompter.confirm(&format!("Continue with {name}?"))? {
        print_warning("Aborted scraping job info.");
        return Ok(());
    }

    let id_file = read_id_file(&id_path)?;
    println!("Found {} jobs.", id_file.ids.len());

    let extractor = RecordExtractor::new(engine, site, settings.clone())?;
    let progress = progress_bar("jobs")?;
    let report = harvest(&extractor, &id_file.ids, |done, total| {
        progress.set_length(u64::try_from(total).unwrap_or(u64::MAX));
        progress.set_position(u64::try_from(done).unwrap_or(u64::MAX));
    })
    .await;
    progress.finish_and_clear();

    let record_path = record_path_for(&config.paths, &id_path, test);
    write_records(&record_path, &report.records)
        .with_context(|| format!("failed to write {}", record_path.display()))?;
    print_success(&format!("Updated job info at {}.", record_path.display()));
    println!("{}", report.summary());

    if let Some(first) = report.records.first() {
        println!("----- Sample first row -----");
        println!("{}", serde_json::to_string_pretty(first)?);
    }
    Ok(())
}

/// The identifier file to scrape and the recent ones to show.
fn select_id_file(paths: &PathsConfig, test: bool) -> Result<(PathBuf, Vec<PathBuf>)> {
    let recent = latest_id_files(&paths.id_dir)?;
    let chosen = if test {
        paths.test_id_path()
    } else {
        recent.first().cloned().with_context(|| {
            format!(
                "no identifier files in {}; run with --id first",
                paths.id_dir.display()
            )
        })?
    };
    Ok((chosen, recent))
}

fn record_path_for(paths: &PathsConfig, id_path: &Path, test: bool) -> PathBuf {
    if test {
        paths.test_info_path()
    } else {
        record_file_path(&paths.info_dir, id_path)
    }
}

/// `[i/n]` progress bar on stderr.
fn progress_bar(unit: &str) -> Result<ProgressBar> {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "[{{pos}}/{{len}}] {unit} [{{bar:40.cyan/blue}}] ({{eta}})"
            ))?
            .progress_chars("#>-"),
    );
    Ok(bar)
}
