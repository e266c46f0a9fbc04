use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use certdash::aggregate::TOP_COUNTRIES;
use certdash::config::{self, SchemaPreset, SourceConfig};
use certdash::report;
use certdash::{DashboardView, RecordStore};

#[derive(Parser)]
#[command(name = "certdash")]
#[command(about = "Certification dashboard tables from the certifications API", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,
    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "CERTDASH_LOG_JSON")]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Base URL of the certifications API
    #[arg(long = "url", global = true, env = "CERTDASH_API_BASE_URL")]
    base_url: Option<String>,
    /// Path appended to the base URL
    #[arg(long, global = true, env = "CERTDASH_API_ENDPOINT")]
    endpoint: Option<String>,
    /// Read records from a JSON array file instead of the API
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    /// Read records from a CSV file instead of the API
    #[arg(long, global = true)]
    csv: Option<PathBuf>,
    /// Field naming used by the source
    #[arg(long, global = true, value_enum, default_value_t = SchemaPreset::English)]
    schema: SchemaPreset,
    /// JSON file mapping record attributes to source field names
    #[arg(long, global = true)]
    field_map: Option<PathBuf>,
}

#[derive(Args)]
struct FilterArgs {
    /// Country to toggle, applied in order. Repeating a country deselects
    /// it; "All" toggles every country on or off
    #[arg(long = "country")]
    countries: Vec<String>,
    /// Certification year to keep
    #[arg(long = "year")]
    years: Vec<i32>,
    /// Certification month to keep, 1-12
    #[arg(long = "month", value_parser = clap::value_parser!(u32).range(1..=12))]
    months: Vec<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print totals, type mix and top countries
    Summary {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, default_value_t = TOP_COUNTRIES)]
        limit: usize,
    },
    /// Print the twelve monthly buckets
    Trend {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// List the countries and years available for filtering
    Facets,
    /// Generate a markdown report
    Report {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, default_value = "Certification Dashboard")]
        title: String,
        #[arg(long, default_value = "dashboard.md")]
        out: PathBuf,
    },
    /// Write every dashboard table as JSON
    Export {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, default_value = "dashboard.json")]
        out: PathBuf,
    },
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn load_store(args: &SourceArgs) -> anyhow::Result<RecordStore> {
    let fields = config::field_map(args.schema, args.field_map.as_deref())
        .context("failed to read field map")?;
    let source = SourceConfig::resolve(
        args.base_url.clone(),
        args.endpoint.clone(),
        args.file.clone(),
        args.csv.clone(),
    )
    .context("no record source: pass --url (or CERTDASH_API_BASE_URL), --file or --csv")?;

    let mut store = RecordStore::default();
    store.apply_fetch(source.load(&fields).await);
    Ok(store)
}

fn selection(filters: &FilterArgs, store: &RecordStore) -> certdash::FilterSelection {
    config::selection_from_args(
        &filters.countries,
        &filters.years,
        &filters.months,
        &store.countries(),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let store = load_store(&cli.source).await?;

    match cli.command {
        Commands::Summary { filters, limit } => {
            let active = selection(&filters, &store);
            let view = DashboardView::compute_with_limit(store.records(), &active, limit);
            let summary = &view.summary;

            println!("Filters: {}", report::describe_selection(&view.selection));
            println!("Total certifications: {}", summary.total);
            println!("Onshore: {} ({:.1}%)", summary.onshore, summary.onshore_pct);
            println!("Offshore: {} ({:.1}%)", summary.offshore, summary.offshore_pct);

            if view.by_type.is_empty() {
                println!("No certifications match these filters.");
                return Ok(());
            }

            println!("By type:");
            for entry in &view.by_type {
                println!("- {}: {}", entry.key, entry.count);
            }
            println!("Top countries:");
            for entry in &view.top_countries {
                println!("- {}: {}", entry.key, entry.count);
            }
        }
        Commands::Trend { filters } => {
            let view = DashboardView::compute(store.records(), &selection(&filters, &store));
            for bucket in &view.monthly_trend {
                println!(
                    "{:<10} total {:>5}  onshore {:>5}  offshore {:>5}",
                    bucket.label, bucket.total, bucket.onshore, bucket.offshore
                );
            }
        }
        Commands::Facets => {
            println!("Countries: {}", store.countries().join(", "));
            let years: Vec<String> = store.years().iter().map(i32::to_string).collect();
            println!("Years: {}", years.join(", "));
        }
        Commands::Report {
            filters,
            title,
            out,
        } => {
            let view = DashboardView::compute(store.records(), &selection(&filters, &store));
            let report = report::build_report(&title, &view);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export { filters, out } => {
            let view = DashboardView::compute(store.records(), &selection(&filters, &store));
            let json = serde_json::to_string_pretty(&view).context("failed to encode dashboard")?;
            std::fs::write(&out, json)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Dashboard written to {}.", out.display());
        }
    }

    Ok(())
}
