use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reposcope::analysis::{AnalysisOrchestrator, CloneTarget};
use reposcope::models::{RepoReport, RepoSummary};
use reposcope::storage::{self, reconcile, AdvancedStore, FavoritesStore};
use reposcope::{Config, GitCloner, GitHubClient, Session, SessionAction};

#[derive(Parser, Debug)]
#[command(name = "reposcope")]
#[command(version = "0.1.0")]
#[command(about = "Search GitHub repositories and analyze their lines of code")]
struct Args {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Search repositories and list them with favorite flags
    Search {
        /// Search query
        query: String,

        /// Result page to show
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Results per page (max 100), defaults to SEARCH_PER_PAGE
        #[arg(long)]
        per_page: Option<u32>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Search, then clone and line-count every repository on the page
    Analyze {
        /// Search query
        query: String,

        /// Result page to analyze
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Results per page (max 100), defaults to SEARCH_PER_PAGE
        #[arg(long)]
        per_page: Option<u32>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Inspect or update the persisted favorites
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },
    /// Cached line-count reports for favorited repositories
    Advanced {
        #[command(subcommand)]
        command: AdvancedCommand,
    },
}

#[derive(Subcommand, Debug)]
enum FavoritesCommand {
    /// Print the favorites as display rows
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Reconcile an edited display table (CSV) against the store
    Apply {
        /// Path to the edited table
        #[arg(long)]
        table: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum AdvancedCommand {
    /// Analyze and archive newly favorited repositories, prune removed ones
    Update,
    /// Print the cached reports
    Show {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("reposcope=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    match args.command {
        CliCommand::Search {
            query,
            page,
            per_page,
            format,
        } => {
            let session = fetch_page(&config, query, page, per_page).await?;
            let favorites = FavoritesStore::open(&config.favorites_path)?;
            let rows = session.rows_with_favorites(&favorites);
            let title = format!("Search results, page {}", session.current_page);
            output_rows(&rows, &format, &title)?;
        }

        CliCommand::Analyze {
            query,
            page,
            per_page,
            format,
        } => {
            let session = fetch_page(&config, query, page, per_page).await?;
            let targets: Vec<CloneTarget> =
                session.repositories.iter().map(CloneTarget::from).collect();
            tracing::info!("Running detailed analysis on {} repositories", targets.len());

            let orchestrator = AnalysisOrchestrator::new(GitCloner, &config);
            let reports = orchestrator.analyze_detailed(&targets).await;
            output_reports(&reports, &format)?;
        }

        CliCommand::Favorites { command } => match command {
            FavoritesCommand::List { format } => {
                let favorites = FavoritesStore::open(&config.favorites_path)?;
                let rows: Vec<RepoSummary> =
                    favorites.records().iter().map(RepoSummary::from).collect();
                output_rows(&rows, &format, "Favorites")?;
            }
            FavoritesCommand::Apply { table } => {
                let rows: Vec<RepoSummary> = storage::load_rows_tolerant(&table)?;
                let mut favorites = FavoritesStore::open(&config.favorites_path)?;
                let outcome = reconcile(&rows, &mut favorites)?;
                println!(
                    "{} added, {} removed, {} favorites total",
                    outcome.added,
                    outcome.removed,
                    favorites.records().len()
                );
            }
        },

        CliCommand::Advanced { command } => match command {
            AdvancedCommand::Update => {
                let favorites = FavoritesStore::open(&config.favorites_path)?;
                let mut advanced = AdvancedStore::open(&config.advanced_path)?;
                let orchestrator = AnalysisOrchestrator::new(GitCloner, &config);
                let outcome = orchestrator.update_advanced(&favorites, &mut advanced).await?;

                if outcome.analyzed.is_empty() && outcome.pruned.is_empty() {
                    println!("Advanced analysis already up to date.");
                } else {
                    for name in &outcome.analyzed {
                        println!("analyzed {}", name);
                    }
                    for name in &outcome.pruned {
                        println!("pruned {}", name);
                    }
                }
            }
            AdvancedCommand::Show { format } => {
                let advanced = AdvancedStore::open(&config.advanced_path)?;
                output_reports(advanced.records(), &format)?;
            }
        },
    }

    Ok(())
}

async fn fetch_page(
    config: &Config,
    query: String,
    page: u32,
    per_page: Option<u32>,
) -> anyhow::Result<Session> {
    let client = GitHubClient::new(config.github_token.as_deref())?;
    let mut session = Session::new(per_page.unwrap_or(config.per_page));

    session.handle(SessionAction::Search { query }, &client).await?;
    for _ in 1..page {
        session.handle(SessionAction::NextPage, &client).await?;
    }
    Ok(session)
}

fn output_rows(rows: &[RepoSummary], format: &str, title: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(rows)?),
        _ => print!("{}", format_rows(rows, title)),
    }
    Ok(())
}

fn output_reports(reports: &[RepoReport], format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(reports)?),
        _ => print!("{}", format_reports(reports)),
    }
    Ok(())
}

fn format_rows(rows: &[RepoSummary], title: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n=== {} ===\n\n", title));

    if rows.is_empty() {
        output.push_str("No repositories found.\n");
        return output;
    }

    for row in rows {
        let marker = if row.favorite { "*" } else { " " };
        output.push_str(&format!("[{}] {}\n", marker, row.name));
        output.push_str(&format!("    {}\n", row.url));
        if let Some(ref description) = row.description {
            output.push_str(&format!("    {}\n", description));
        }
        output.push_str(&format!(
            "    stars: {}  forks: {}  open issues: {}  language: {}  license: {}\n",
            row.stars,
            row.forks,
            row.open_issues,
            row.language.as_deref().unwrap_or("-"),
            row.license.as_deref().unwrap_or("-"),
        ));
    }

    output
}

fn format_reports(reports: &[RepoReport]) -> String {
    let mut output = String::new();

    if reports.is_empty() {
        output.push_str("No reports available.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<32} {:>10} {:>10} {:>10} {:>10}\n",
        "Name", "Total", "Code", "Comment", "Blank"
    ));
    for report in reports {
        output.push_str(&format!(
            "{:<32} {:>10} {:>10} {:>10} {:>10}\n",
            report.name,
            report.total_lines,
            report.code_lines,
            report.comment_lines,
            report.blank_lines
        ));
        let languages = language_breakdown(report);
        if !languages.is_empty() {
            output.push_str(&format!("{:<32} {}\n", "", languages));
        }
    }

    output
}

fn language_breakdown(report: &RepoReport) -> String {
    [
        ("java", report.java_lines),
        ("python", report.python_lines),
        ("javascript", report.javascript_lines),
        ("rust", report.rust_lines),
        ("css", report.css_lines),
        ("html", report.html_lines),
    ]
    .iter()
    .filter(|(_, count)| *count > 0)
    .map(|(language, count)| format!("{}: {}", language, count))
    .collect::<Vec<_>>()
    .join("  ")
}
