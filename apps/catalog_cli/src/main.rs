mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{catalog, load_settings, open_backend, CatalogBackend, CatalogSettings};
use shared::domain::{Category, ScriptRecord};
use tracing_subscriber::EnvFilter;

use crate::render::{category_listing, script_detail, script_line, summarize, ScriptSummary};

#[derive(Parser, Debug)]
#[command(name = "script-catalog", about = "Query the script catalog from a terminal")]
struct Cli {
    #[arg(long, global = true)]
    backend_url: Option<String>,
    /// Read an exported catalog JSON file instead of the backend.
    #[arg(long, global = true)]
    catalog_file: Option<PathBuf>,
    #[arg(long, global = true)]
    page_size: Option<u32>,
    /// Print machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Every category with its scripts.
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Scripts whose title contains TERM (case-insensitive).
    Search { term: String },
    /// One script by record id or exact title.
    Show { key: String },
    /// Most recently added scripts.
    Latest {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Scripts flagged as most viewed.
    Popular,
}

impl Cli {
    fn settings(&self) -> CatalogSettings {
        let mut settings = load_settings();
        if let Some(url) = &self.backend_url {
            settings.backend_url = url.clone();
        }
        if let Some(page_size) = self.page_size.filter(|size| *size > 0) {
            settings.page_size = page_size;
        }
        settings
    }
}

/// Categories with at least one script matching `term`, narrowed to the matches.
fn filter_categories<'a>(
    categories: &'a [Category],
    term: &str,
) -> Vec<(&'a Category, Vec<&'a ScriptRecord>)> {
    categories
        .iter()
        .filter_map(|category| {
            let scripts: Vec<_> = category
                .items()
                .iter()
                .filter(|script| script.matches(term))
                .collect();
            (!scripts.is_empty()).then_some((category, scripts))
        })
        .collect()
}

/// The single matching listing, if there is exactly one across all categories.
fn unique_match<'a>(entries: &[(&'a Category, Vec<&'a ScriptRecord>)]) -> Option<&'a ScriptRecord> {
    let mut listings = entries.iter().flat_map(|(_, scripts)| scripts.iter().copied());
    match (listings.next(), listings.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}

fn summaries<'a>(categories: &'a [Category], scripts: &[&'a ScriptRecord]) -> Vec<ScriptSummary<'a>> {
    scripts
        .iter()
        .map(|&script| {
            let category = catalog::category_of(categories, &script.title)
                .map(|category| category.name.as_str());
            summarize(script, category)
        })
        .collect()
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli, backend: &dyn CatalogBackend, latest_limit: usize) -> Result<()> {
    match &cli.command {
        Command::Show { key } => {
            let script = match backend.resolve_script(key).await {
                Ok(script) => script,
                Err(err) => {
                    if cli.json {
                        print_json(&err.to_api_error())?;
                    }
                    return Err(anyhow::Error::new(err)
                        .context(format!("could not load script '{key}'")));
                }
            };
            if cli.json {
                print_json(&script)?;
            } else {
                print!("{}", script_detail(&script));
            }
            return Ok(());
        }
        Command::List { .. }
        | Command::Search { .. }
        | Command::Latest { .. }
        | Command::Popular => {}
    }

    let categories = backend
        .list_categories()
        .await
        .context("could not load the catalog")?;
    tracing::debug!(categories = categories.len(), "catalog fetched");

    match cli.command {
        Command::List { category } => {
            let mut entries = filter_categories(&categories, "");
            if let Some(name) = category {
                entries.retain(|(category, _)| category.name.eq_ignore_ascii_case(&name));
            }
            if cli.json {
                let scripts: Vec<_> = entries
                    .iter()
                    .flat_map(|(_, scripts)| scripts.iter().copied())
                    .collect();
                print_json(&summaries(&categories, &scripts))?;
            } else {
                print!("{}", category_listing(&entries));
                println!("{} Total scripts", catalog::total_scripts(&categories));
            }
        }
        Command::Search { term } => {
            let entries = filter_categories(&categories, &term);
            let matches: Vec<_> = entries
                .iter()
                .flat_map(|(_, scripts)| scripts.iter().copied())
                .collect();
            if cli.json {
                print_json(&summaries(&categories, &matches))?;
            } else if entries.is_empty() {
                println!("No scripts match '{term}'.");
            } else {
                print!("{}", category_listing(&entries));
                if let Some(only) = unique_match(&entries) {
                    println!();
                    print!("{}", script_detail(only));
                }
            }
        }
        Command::Latest { limit } => {
            let latest = catalog::latest_scripts(&categories, limit.unwrap_or(latest_limit));
            if cli.json {
                print_json(&summaries(&categories, &latest))?;
            } else {
                for script in latest {
                    let date = script
                        .date_added()
                        .map(|date| date.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "unknown date".to_string());
                    println!("{date}  {}", script_line(script));
                }
            }
        }
        Command::Popular => {
            let popular = catalog::most_viewed_scripts(&categories);
            if cli.json {
                print_json(&summaries(&categories, &popular))?;
            } else {
                for script in popular {
                    println!("{}", script_line(script));
                }
            }
        }
        Command::Show { .. } => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = cli.settings();
    let opened = open_backend(&settings, cli.catalog_file.as_deref())
        .context("failed to open the script catalog")?;
    tracing::info!(backend = %opened.label, "querying catalog");
    run(cli, opened.backend.as_ref(), settings.latest_limit).await
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
