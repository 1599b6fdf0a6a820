//! # bomdrop
//!
//! Build and inspect the BoMdrop cost comparison site from the command line.
//!
//! ## Overview
//!
//! bomdrop is built on top of bomdroplib. It loads the comparison dataset
//! and site configuration, then either writes the static site exports or
//! prints one view of the derived data.
//!
//! ## Usage
//!
//! ```bash
//! # Write feed, CSV, sitemap, page models and preview cards
//! bomdrop build --out public
//!
//! # The sources table, most expensive first
//! bomdrop table --sort cost --desc
//!
//! # One comparison, as JSON
//! bomdrop show ambulance --output json
//!
//! # Use a different dataset and base URL
//! bomdrop --data comparisons.json --base-url https://staging.bomdrop.com.au feed
//!
//! # Check procurement context numbers against computed quantities
//! bomdrop verify
//! ```

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use bomdroplib::output::{
    build_csv_rows, render_csv, CategoryIndex, CategoryPage, ComparisonPage, Feed, FeedResponse,
    ItemView, SourcesTable,
};
use bomdroplib::{
    audit_calculations, filter_and_sort, publish, search, CardRenderer, CategoryFilter, Dataset,
    Site, SiteConfig, SortField, Statistics, SvgCardRenderer, TableQuery,
};
use chrono::Utc;
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use render::OutputMode;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("bomdrop")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Derived data and static exports for the BoMdrop cost comparison site")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .value_name("PATH")
                .help("Dataset JSON file (defaults to the bundled dataset)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .help("Site config TOML file (defaults to ./bomdrop.toml if present)"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .global(true)
                .value_name("URL")
                .help("Override the canonical base URL"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .global(true)
                .value_parser(["text", "table", "json", "csv"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit log lines as JSON"),
        )
        .subcommand(
            Command::new("build")
                .about("Write the feed, CSV, sitemap, page models and preview cards")
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_name("DIR")
                        .default_value("public")
                        .help("Output directory"),
                ),
        )
        .subcommand(Command::new("feed").about("Print the JSON data feed"))
        .subcommand(
            Command::new("table")
                .about("Show the sources table")
                .arg(
                    Arg::new("sort")
                        .short('s')
                        .long("sort")
                        .default_value("name")
                        .help("Sort column: name, cost, quantity, category, verified"),
                )
                .arg(
                    Arg::new("desc")
                        .long("desc")
                        .action(ArgAction::SetTrue)
                        .help("Sort descending"),
                )
                .arg(
                    Arg::new("category")
                        .short('c')
                        .long("category")
                        .value_name("SLUG")
                        .help("Only show one category"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show one comparison")
                .arg(Arg::new("id").required(true).help("Comparison id")),
        )
        .subcommand(
            Command::new("category")
                .about("List categories, or show one")
                .arg(Arg::new("slug").help("Category slug")),
        )
        .subcommand(
            Command::new("search")
                .about("Search names, descriptions, categories and tags")
                .arg(Arg::new("query").required(true).num_args(1..).help("Search text")),
        )
        .subcommand(Command::new("stats").about("Show dataset statistics"))
        .subcommand(
            Command::new("verify")
                .about("Check procurement context numbers against computed quantities"),
        )
}

/// Install the tracing subscriber; logs go to stderr
fn init_logging(verbosity: u8, json: bool) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    if let Err(e) = result {
        eprintln!("Warning: could not initialise logging: {e}");
    }
}

/// Load configuration and dataset into a site context
fn load_site(matches: &ArgMatches) -> anyhow::Result<Site> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => SiteConfig::load(path).with_context(|| format!("loading config {path}"))?,
        None => {
            let cwd = std::env::current_dir().context("reading current directory")?;
            SiteConfig::discover(cwd)?
        }
    };
    if let Some(url) = matches.get_one::<String>("base-url") {
        config = config.base_url(url);
    }

    let dataset = match matches.get_one::<String>("data") {
        Some(path) => Dataset::load(path).with_context(|| format!("loading dataset {path}"))?,
        None => Dataset::bundled().context("loading bundled dataset")?,
    };

    Ok(Site::new(config, dataset)?)
}

fn output_mode(matches: &ArgMatches) -> anyhow::Result<OutputMode> {
    let raw = matches
        .get_one::<String>("output")
        .map(|s| s.as_str())
        .unwrap_or("text");
    raw.parse().map_err(anyhow::Error::msg)
}

/// Only the sources table has a CSV form.
fn check_mode(command: &str, mode: OutputMode) -> anyhow::Result<()> {
    if mode == OutputMode::Csv && command != "table" {
        bail!("'--output csv' is only supported by 'table', not '{command}'");
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn build_handler(site: &Site, matches: &ArgMatches, mode: OutputMode) -> anyhow::Result<()> {
    let out = matches
        .get_one::<String>("out")
        .map(|s| s.as_str())
        .unwrap_or("public");
    let renderer = SvgCardRenderer::new();
    let report = publish(site, PathBuf::from(out), &renderer, Utc::now())
        .with_context(|| format!("publishing to {out}"))?;

    match mode {
        OutputMode::Json => print_json(&report)?,
        _ => print!("{}", render::render_publish(&report, out)),
    }

    if !report.cards.is_complete() {
        bail!(
            "{} of {} preview cards failed",
            report.cards.failures.len(),
            site.dataset().len()
        );
    }
    Ok(())
}

fn feed_handler(site: &Site) -> anyhow::Result<()> {
    let response = FeedResponse::new(&Feed::build(site, Utc::now()))?;
    println!("{}", response.body);
    Ok(())
}

fn table_handler(site: &Site, matches: &ArgMatches, mode: OutputMode) -> anyhow::Result<()> {
    let sort: SortField = matches
        .get_one::<String>("sort")
        .map(|s| s.as_str())
        .unwrap_or("name")
        .parse()
        .map_err(anyhow::Error::msg)?;
    let category: CategoryFilter = match matches.get_one::<String>("category") {
        Some(slug) => slug.parse().map_err(anyhow::Error::msg)?,
        None => CategoryFilter::All,
    };
    let mut query = TableQuery::new().sort_by(sort).category(category);
    if matches.get_flag("desc") {
        query = query.descending();
    }

    match mode {
        OutputMode::Csv => {
            let items = filter_and_sort(site.dataset().get_all(), &query, site.reference_total());
            print!("{}", render_csv(&build_csv_rows(site, items)));
        }
        OutputMode::Json => print_json(&SourcesTable::build(site, &query))?,
        OutputMode::Text => print!("{}", render::render_table(&SourcesTable::build(site, &query))),
    }
    Ok(())
}

fn show_handler(site: &Site, matches: &ArgMatches, mode: OutputMode) -> anyhow::Result<()> {
    let id = matches
        .get_one::<String>("id")
        .map(|s| s.as_str())
        .unwrap_or_default();
    let Some(page) = ComparisonPage::build(site, id, SvgCardRenderer::new().extension()) else {
        bail!("No comparison found with id '{id}'");
    };
    match mode {
        OutputMode::Json => print_json(&page)?,
        _ => print!("{}", render::render_comparison(&page)),
    }
    Ok(())
}

fn category_handler(site: &Site, matches: &ArgMatches, mode: OutputMode) -> anyhow::Result<()> {
    match matches.get_one::<String>("slug") {
        Some(slug) => {
            let Some(page) = CategoryPage::build(site, slug) else {
                bail!("No category found with slug '{slug}'");
            };
            match mode {
                OutputMode::Json => print_json(&page)?,
                _ => print!("{}", render::render_category(&page)),
            }
        }
        None => {
            let index = CategoryIndex::build(site);
            match mode {
                OutputMode::Json => print_json(&index)?,
                _ => print!("{}", render::render_category_index(&index)),
            }
        }
    }
    Ok(())
}

fn search_handler(site: &Site, matches: &ArgMatches, mode: OutputMode) -> anyhow::Result<()> {
    let query = matches
        .get_many::<String>("query")
        .map(|words| words.map(|s| s.as_str()).collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    let items: Vec<ItemView> = search(site.dataset().get_all(), &query)
        .into_iter()
        .map(|r| ItemView::new(site, r))
        .collect();
    match mode {
        OutputMode::Json => print_json(&items)?,
        _ => print!("{}", render::render_search(&query, &items)),
    }
    Ok(())
}

fn stats_handler(site: &Site, mode: OutputMode) -> anyhow::Result<()> {
    let stats = Statistics::compute(site.dataset());
    match mode {
        OutputMode::Json => print_json(&stats)?,
        _ => print!("{}", render::render_stats(&stats)),
    }
    Ok(())
}

fn verify_handler(site: &Site, mode: OutputMode) -> anyhow::Result<()> {
    let report = audit_calculations(site)?;
    match mode {
        OutputMode::Json => print_json(&report)?,
        _ => print!("{}", render::render_verification(&report)),
    }
    if !report.is_consistent() {
        bail!(
            "{} procurement context number(s) disagree with computed quantities",
            report.inconsistencies.len()
        );
    }
    Ok(())
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let mode = output_mode(matches)?;
    if let Some(command) = matches.subcommand_name() {
        check_mode(command, mode)?;
    }
    let site = load_site(matches)?;
    tracing::debug!(
        comparisons = site.dataset().len(),
        base_url = %site.config().base_url,
        "site loaded"
    );

    match matches.subcommand() {
        Some(("build", sub)) => build_handler(&site, sub, mode),
        Some(("feed", _)) => feed_handler(&site),
        Some(("table", sub)) => table_handler(&site, sub, mode),
        Some(("show", sub)) => show_handler(&site, sub, mode),
        Some(("category", sub)) => category_handler(&site, sub, mode),
        Some(("search", sub)) => search_handler(&site, sub, mode),
        Some(("stats", _)) => stats_handler(&site, mode),
        Some(("verify", _)) => verify_handler(&site, mode),
        _ => bail!("No command given. Run 'bomdrop --help' for usage."),
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();

    init_logging(
        matches.get_count("verbose"),
        matches.get_flag("log-json"),
    );

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let matches = build_command()
            .try_get_matches_from(["bomdrop", "table", "--output", "csv", "-vv"])
            .unwrap();
        assert_eq!(output_mode(&matches).unwrap(), OutputMode::Csv);
        assert_eq!(matches.get_count("verbose"), 2);
    }

    #[test]
    fn test_csv_only_for_table() {
        assert!(check_mode("table", OutputMode::Csv).is_ok());
        assert!(check_mode("stats", OutputMode::Json).is_ok());
        for command in ["build", "feed", "show", "category", "search", "stats", "verify"] {
            let err = check_mode(command, OutputMode::Csv).unwrap_err();
            assert!(err.to_string().contains(command));
        }
    }

    #[test]
    fn test_load_site_with_base_url_override() {
        let matches = build_command()
            .try_get_matches_from(["bomdrop", "--base-url", "https://example.org/", "stats"])
            .unwrap();
        let site = load_site(&matches).unwrap();
        assert_eq!(site.config().base_url, "https://example.org");
    }
}
