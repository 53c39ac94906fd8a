//! CLI for browsing the SQL Server catalog view dictionary.

use clap::{Parser, Subcommand, ValueEnum};
use mssql_catalog::{
    CatalogConfig, CatalogEntry, CatalogError, Config, ResultSetSnapshot, ViewCatalog,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "mssql-catalog")]
#[command(about = "Typed readers and SQL for SQL Server catalog views")]
#[command(version)]
struct Cli {
    /// Path to an optional configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    output_json: bool,

    /// Log format (text or json)
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity (debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog views
    List {
        /// Only list views matching this glob (e.g. "sys.dm_*")
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show a view's SQL and column layout
    Show {
        /// View name: sys.objects, [sys].[objects] or objects
        view: String,
    },

    /// Dump the whole dictionary
    Export {
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,
    },

    /// Map a JSON result-set snapshot through a view's reader
    Map {
        /// View the snapshot was captured from
        view: String,

        /// Snapshot file: {"columns": [...], "rows": [[...], ...]}
        #[arg(short, long)]
        input: PathBuf,

        /// Check the snapshot's column layout against the view first
        #[arg(long)]
        checked: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Yaml,
}

/// One line of `list` output.
#[derive(Serialize)]
struct ViewSummary {
    name: String,
    family: &'static str,
    alias: &'static str,
    columns: usize,
}

impl ViewSummary {
    fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            name: entry.view.qualified_name(),
            family: entry.family,
            alias: entry.view.alias,
            columns: entry.view.column_count(),
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), CatalogError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(CatalogError::Config)?;

    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => Config::default(),
    };
    let catalog = config.view_catalog()?;
    debug!("Catalog has {} views", catalog.len());

    match cli.command {
        Commands::List { filter } => {
            let catalog = match filter {
                Some(pattern) => catalog.filtered(&CatalogConfig {
                    include_views: vec![pattern],
                    exclude_views: Vec::new(),
                })?,
                None => catalog,
            };
            list_views(&catalog, cli.output_json)?;
        }

        Commands::Show { view } => {
            let entry = catalog.get(&view)?;
            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(entry)?);
            } else {
                print_view(entry);
            }
        }

        Commands::Export { format } => {
            let entries: Vec<&CatalogEntry> = catalog.iter().collect();
            match format {
                ExportFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                ExportFormat::Yaml => print!("{}", serde_yaml::to_string(&entries)?),
            }
        }

        Commands::Map {
            view,
            input,
            checked,
        } => {
            let entry = catalog.get(&view)?;
            let snapshot = ResultSetSnapshot::load(&input)?;
            info!(
                "Mapping {} rows from {:?} through {}",
                snapshot.rows.len(),
                input,
                entry.view.qualified_name()
            );
            let records = entry.map_snapshot(snapshot, checked || config.reader.validate_layout)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}

fn list_views(catalog: &ViewCatalog, output_json: bool) -> Result<(), CatalogError> {
    let summaries: Vec<ViewSummary> = catalog.iter().map(ViewSummary::from_entry).collect();

    if output_json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    let width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for s in &summaries {
        println!(
            "{:<width$}  {:<12} {:<6} {:>3} columns",
            s.name,
            s.family,
            s.alias,
            s.columns,
            width = width
        );
    }
    println!("\n{} views", summaries.len());
    Ok(())
}

fn print_view(entry: &CatalogEntry) {
    let view = entry.view;
    println!("-- {} ({})", view.qualified_name(), entry.family);
    println!("{}", view.sql);
    println!();

    let width = view.columns.iter().map(|c| c.name.len()).max().unwrap_or(0);
    println!("{:>3}  {:<width$}  {:<16} NULL", "#", "COLUMN", "TYPE", width = width);
    for (ordinal, column) in view.columns.iter().enumerate() {
        println!(
            "{:>3}  {:<width$}  {:<16} {}",
            ordinal,
            column.name,
            column.sql_type.sql_name(),
            if column.nullable { "YES" } else { "NO" },
            width = width
        );
    }
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so stdout stays parseable.
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => return Err(format!("Unknown log format '{}' (expected text or json)", other)),
    }

    Ok(())
}
