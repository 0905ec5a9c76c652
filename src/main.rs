use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use hackathon_scraper::analysis::{export_csv, Filter, Statistics, CSV_OUTPUT_FILE};
use hackathon_scraper::storage::load_records;
use hackathon_scraper::visualize::{
    render_report, save_report, ChartRenderer, HackathonTable, Insights,
};
use hackathon_scraper::{HackathonClient, HackathonRecord, RenderConfig, Result};

const DEFAULT_THEME_FILE: &str = "remote_hackathons.json";
const ALL_THEMES_FILE: &str = "all_hackathons.json";

#[derive(Parser)]
#[command(
    name = "hackathon-scraper",
    about = "Scrape, analyze and chart allhackathons.com listings"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape one theme (or every theme) and save the records as JSON
    Scrape {
        /// Theme slug, e.g. "remote" or "ai"
        #[arg(short, long, default_value = "remote")]
        theme: String,
        /// Scrape every known theme instead of a single one
        #[arg(long, conflicts_with = "theme")]
        all: bool,
        /// Output file (defaults to remote_hackathons.json, or all_hackathons.json with --all)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print statistics and sample filters, then export CSV
    Analyze {
        #[arg(short, long, default_value = DEFAULT_THEME_FILE)]
        input: PathBuf,
        #[arg(long, default_value = CSV_OUTPUT_FILE)]
        csv: PathBuf,
    },
    /// Render the charts and the insights report
    Visualize {
        #[arg(short, long, default_value = DEFAULT_THEME_FILE)]
        input: PathBuf,
        #[arg(short, long, default_value = "charts")]
        output_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape { theme, all, output } => scrape(&theme, all, output).await,
        Commands::Analyze { input, csv } => analyze(&input, &csv),
        Commands::Visualize { input, output_dir } => visualize(&input, output_dir),
    }
}

async fn scrape(theme: &str, all: bool, output: Option<PathBuf>) -> Result<()> {
    let client = HackathonClient::new()?;
    let rule = "=".repeat(60);

    if all {
        let output = output.unwrap_or_else(|| PathBuf::from(ALL_THEMES_FILE));
        println!("Scraping ALL themes...");
        let by_theme = client.scrape_all_themes(Some(&output)).await;
        println!("\n{rule}\nSUMMARY\n{rule}");
        for (slug, records) in &by_theme {
            println!("  {slug}: {}", records.len());
        }
        let total: usize = by_theme.values().map(Vec::len).sum();
        println!("Total hackathons scraped: {total}");
        return Ok(());
    }

    let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_THEME_FILE));
    println!("Scraping {theme} hackathons...");
    let records = client.scrape_theme(theme, Some(&output)).await;
    println!("\n{rule}\nSUMMARY\n{rule}");
    println!("Total hackathons scraped: {}", records.len());
    if let Some(first) = records.first() {
        println!("\nSample hackathon:");
        println!("{}", serde_json::to_string_pretty(first)?);
    }
    Ok(())
}

fn analyze(input: &Path, csv: &Path) -> Result<()> {
    println!("Loading hackathons...");
    let records = load_records(input)?;
    println!("{}", Statistics::compute(&records));

    let rule = "=".repeat(60);
    println!("\n{rule}\nFILTERED RESULTS\n{rule}");

    let upcoming_online = Filter::new()
        .status("Upcoming")
        .location_type("ONLINE")
        .apply(&records);
    print_sample("Upcoming Online Hackathons", &upcoming_online, |h| {
        format!("{} ({})", title(h), h.dates.as_deref().unwrap_or("N/A"))
    });

    let ai = Filter::new().theme("ai").apply(&records);
    print_sample("AI-themed Hackathons", &ai, |h| title(h).to_string());

    let with_prizes = Filter::new().has_prizes(true).apply(&records);
    print_sample("Hackathons with Prizes", &with_prizes, |h| {
        format!("{} - {}", title(h), h.prizes.as_deref().unwrap_or("N/A"))
    });

    println!("\n{rule}");
    export_csv(&records, csv)?;
    println!("Exported {} hackathons to {}", records.len(), csv.display());
    Ok(())
}

fn visualize(input: &Path, output_dir: PathBuf) -> Result<()> {
    let rule = "=".repeat(70);
    println!("{rule}\nHACKATHON DATA VISUALIZATION\n{rule}\n");

    let records = load_records(input)?;
    let insights = Insights::compute(&HackathonTable::from_records(&records));
    let renderer = ChartRenderer::new(RenderConfig {
        output_dir: output_dir.clone(),
        ..Default::default()
    });
    let charts = renderer.render_all(&insights)?;
    for chart in &charts {
        println!("Created {}", output_dir.join(chart).display());
    }

    let report = render_report(&insights, &charts);
    println!("\n{report}");
    save_report(&report, &output_dir)?;
    Ok(())
}

fn print_sample(
    label: &str,
    records: &[HackathonRecord],
    line: impl Fn(&HackathonRecord) -> String,
) {
    println!("\n{label}: {}", records.len());
    if records.is_empty() {
        return;
    }
    println!("Sample:");
    for record in records.iter().take(3) {
        println!("  - {}", line(record));
    }
}

fn title(record: &HackathonRecord) -> &str {
    record.title.as_deref().unwrap_or("N/A")
}
