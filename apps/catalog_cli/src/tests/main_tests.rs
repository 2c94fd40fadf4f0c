use client_core::StaticCatalog;
use shared::domain::RecordId;

use super::*;

fn script(id: &str, title: &str) -> ScriptRecord {
    ScriptRecord {
        id: RecordId(id.to_string()),
        title: title.to_string(),
        ..ScriptRecord::default()
    }
}

fn catalog() -> Vec<Category> {
    vec![
        Category::new("Containers", vec![script("r1", "Docker"), script("r2", "Podman")]),
        Category::new("Media", vec![script("r3", "Plex")]),
    ]
}

#[test]
fn filter_keeps_only_categories_with_matches() {
    let categories = catalog();
    let entries = filter_categories(&categories, "PLE");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0.name, "Media");
    assert_eq!(entries[0].1[0].title, "Plex");
    assert_eq!(filter_categories(&categories, "").len(), 2);
}

#[test]
fn unique_match_counts_every_listing() {
    let categories = catalog();
    assert_eq!(
        unique_match(&filter_categories(&categories, "plex")).map(|s| s.title.as_str()),
        Some("Plex")
    );

    let doubled = vec![
        Category::new("Monitoring", vec![script("g1", "Grafana")]),
        Category::new("Dashboards", vec![script("g1", "Grafana")]),
    ];
    assert!(unique_match(&filter_categories(&doubled, "graf")).is_none());
}

#[test]
fn summaries_name_the_owning_category() {
    let categories = catalog();
    let scripts = catalog::flatten_scripts(&categories);
    let summaries = summaries(&categories, &scripts);
    assert_eq!(summaries[2].title, "Plex");
    assert_eq!(summaries[2].category, Some("Media"));
}

#[test]
fn global_flags_parse_after_the_subcommand() {
    let cli = Cli::parse_from([
        "script-catalog",
        "search",
        "dock",
        "--json",
        "--backend-url",
        "https://catalog.example",
    ]);
    assert!(cli.json);
    assert!(matches!(cli.command, Command::Search { ref term } if term == "dock"));
    assert_eq!(cli.settings().backend_url, "https://catalog.example");
}

#[tokio::test]
async fn show_reports_unknown_scripts() {
    let backend = StaticCatalog::new(catalog());
    let cli = Cli::parse_from(["script-catalog", "show", "Nope"]);
    let err = run(cli, &backend, 6).await.expect_err("unknown script");
    assert_eq!(err.to_string(), "could not load script 'Nope'");
}

#[tokio::test]
async fn listing_subcommands_succeed_offline() {
    let backend = StaticCatalog::new(catalog());
    for args in [
        vec!["script-catalog", "list"],
        vec!["script-catalog", "list", "--category", "media", "--json"],
        vec!["script-catalog", "search", "pod"],
        vec!["script-catalog", "latest", "--limit", "2"],
        vec!["script-catalog", "popular", "--json"],
        vec!["script-catalog", "show", "r1"],
    ] {
        let cli = Cli::parse_from(args);
        run(cli, &backend, 6).await.expect("command runs");
    }
}
