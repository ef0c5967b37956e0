// SalesGrid CLI - clean, analyze, enrich and report on sales transaction files

mod exit_codes;
mod report;
mod tables;
mod util;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use salesgrid_analytics::money::format_money;
use salesgrid_analytics::{analyze, AnalyticsConfig, AnalyticsError, AnalyticsReport, Transaction};
use salesgrid_catalog::{
    create_product_mapping, enrich_sales_data, load_enriched_data, save_enriched_data,
    summarize_enrichment, CatalogClient, CatalogError, EnrichmentSummary,
};
use salesgrid_config::{ConfigError, Settings};
use salesgrid_io::cleaned::{load_cleaned_transactions, save_cleaned_data};
use salesgrid_io::export::export_all;
use salesgrid_io::parse::parse_transactions;
use salesgrid_io::raw::read_sales_data;
use salesgrid_io::validate::validate_and_filter;
use salesgrid_io::{FilterOptions, IoError, ValidationOutcome};

use exit_codes::{
    catalog_exit_code, io_exit_code, EXIT_ERROR, EXIT_IO, EXIT_NO_DATA, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "salesgrid")]
#[command(about = "Sales transaction analytics: clean, analyze, enrich and report")]
#[command(version)]
struct Cli {
    /// Settings file (TOML). Default: ./salesgrid.toml, then the user config dir
    #[arg(long, global = true, env = "SALESGRID_CONFIG")]
    config: Option<PathBuf>,

    /// Log progress details to stderr (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a raw sales file, then save the cleaned file
    #[command(after_help = "\
Examples:
  salesgrid clean data/sales_data.txt
  salesgrid clean data/sales_data.txt --region North --min-amount 1000
  salesgrid clean raw.txt -o output/north.txt --region north")]
    Clean {
        /// Raw pipe-delimited sales file
        raw: PathBuf,

        /// Cleaned output file [default: from settings]
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Print analytics tables for a cleaned file
    #[command(after_help = "\
Examples:
  salesgrid analyze
  salesgrid analyze output/Sales_cleaned_data.txt --top-n 10 --all-days
  salesgrid analyze --export
  salesgrid analyze --json | jq '.regions'")]
    Analyze {
        /// Cleaned sales file [default: from settings]
        cleaned: Option<PathBuf>,

        /// Number of top products by quantity
        #[arg(long, short = 'n')]
        top_n: Option<usize>,

        /// Products with total quantity below this are low performers
        #[arg(long, short = 't')]
        low_threshold: Option<i64>,

        /// Print every day of the daily trend
        #[arg(long)]
        all_days: bool,

        /// Write CSV summaries to the output directory
        #[arg(long)]
        export: bool,

        /// Print the full analytics result as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Join cleaned transactions to the product catalog
    #[command(after_help = "\
Examples:
  salesgrid enrich
  salesgrid enrich --catalog-url http://localhost:8080/products -o enriched.txt")]
    Enrich {
        /// Cleaned sales file [default: from settings]
        cleaned: Option<PathBuf>,

        /// Catalog endpoint returning {\"products\": [...]} [default: from settings]
        #[arg(long)]
        catalog_url: Option<String>,

        /// Enriched output file [default: from settings]
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Compose the text report for a cleaned file
    #[command(after_help = "\
Examples:
  salesgrid report
  salesgrid report output/Sales_cleaned_data.txt --enriched data/enriched_sales_data.txt
  salesgrid report -o /tmp/report.txt")]
    Report {
        /// Cleaned sales file [default: from settings]
        cleaned: Option<PathBuf>,

        /// Enriched file for the enrichment section [default: from settings, if present]
        #[arg(long)]
        enriched: Option<PathBuf>,

        /// Report output file [default: from settings]
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Run the whole pipeline: clean, analyze, export, enrich, report
    #[command(after_help = "\
Examples:
  salesgrid run
  salesgrid run --raw data/sales_data.txt --region South
  salesgrid run --skip-enrich")]
    Run {
        /// Raw sales file [default: from settings]
        #[arg(long)]
        raw: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Do not contact the product catalog
        #[arg(long)]
        skip_enrich: bool,
    },
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Keep only this region (case-insensitive)
    #[arg(long)]
    region: Option<String>,

    /// Keep transactions with amount >= this
    #[arg(long)]
    min_amount: Option<f64>,

    /// Keep transactions with amount <= this
    #[arg(long)]
    max_amount: Option<f64>,
}

impl FilterArgs {
    fn into_options(self) -> Result<FilterOptions, CliError> {
        if let (Some(min), Some(max)) = (self.min_amount, self.max_amount) {
            if min > max {
                return Err(CliError::usage(format!(
                    "--min-amount {min} is greater than --max-amount {max}"
                )));
            }
        }
        let region = self.region.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        Ok(FilterOptions {
            region,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
        })
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = load_settings(cli.config.as_deref()).and_then(|settings| match cli.command {
        Commands::Clean { raw, output, filters } => cmd_clean(&settings, raw, output, filters),
        Commands::Analyze {
            cleaned,
            top_n,
            low_threshold,
            all_days,
            export,
            json,
        } => cmd_analyze(&settings, cleaned, top_n, low_threshold, all_days, export, json),
        Commands::Enrich { cleaned, catalog_url, output } => {
            cmd_enrich(&settings, cleaned, catalog_url, output)
        }
        Commands::Report { cleaned, enriched, output } => {
            cmd_report(&settings, cleaned, enriched, output)
        }
        Commands::Run {
            raw,
            filters,
            skip_enrich,
        } => cmd_run(&settings, raw, filters, skip_enrich),
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_ERROR,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn no_data(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_NO_DATA,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn io(err: IoError) -> Self {
        let hint = match &err {
            IoError::NotFound(_) => {
                Some("check the path, or set [paths] in salesgrid.toml".to_string())
            }
            _ => None,
        };
        Self {
            code: io_exit_code(&err),
            message: err.to_string(),
            hint,
        }
    }

    pub fn catalog(err: CatalogError) -> Self {
        let hint = match &err {
            CatalogError::Network(_) => {
                Some("is the catalog reachable? see --catalog-url".to_string())
            }
            _ => None,
        };
        Self {
            code: catalog_exit_code(&err),
            message: err.to_string(),
            hint,
        }
    }

    pub fn config(err: ConfigError) -> Self {
        let code = match err {
            ConfigError::Read { .. } => EXIT_IO,
            ConfigError::Parse(_) | ConfigError::Validation(_) => EXIT_USAGE,
        };
        Self {
            code,
            message: err.to_string(),
            hint: None,
        }
    }

    pub fn analytics(err: AnalyticsError) -> Self {
        Self::usage(err.to_string())
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn load_settings(explicit: Option<&Path>) -> Result<Settings, CliError> {
    let (settings, source) = Settings::load(explicit).map_err(CliError::config)?;
    match source {
        Some(path) => log::info!("settings from {}", path.display()),
        None => log::info!("settings: built-in defaults"),
    }
    Ok(settings)
}

fn now_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn load_cleaned(path: &Path) -> Result<Vec<Transaction>, CliError> {
    let transactions = load_cleaned_transactions(path).map_err(|e| {
        CliError::io(e)
            .with_hint("run `salesgrid clean <raw>` first, or pass the cleaned file path")
    })?;
    if transactions.is_empty() {
        return Err(CliError::no_data(format!("no transactions in {}", path.display())));
    }
    Ok(transactions)
}

// ============================================================================
// clean
// ============================================================================

fn read_and_validate(raw: &Path, filters: &FilterOptions) -> Result<ValidationOutcome, CliError> {
    let records = read_sales_data(raw).map_err(CliError::io)?;
    eprintln!("✓ Read {} raw records from {}", records.len(), raw.display());

    let parsed = parse_transactions(&records);
    eprintln!("✓ Parsed {} records ({} rejected)", parsed.transactions.len(), parsed.rejected);

    let outcome = validate_and_filter(parsed.transactions, filters);
    if outcome.available_regions.is_empty() {
        eprintln!("  Regions: none");
    } else {
        eprintln!("  Regions: {}", outcome.available_regions.join(", "));
    }
    if let Some((lo, hi)) = outcome.amount_range {
        eprintln!("  Amount range: {} - {}", format_money(lo), format_money(hi));
    }

    let s = &outcome.summary;
    if s.filtered_by_region > 0 || s.filtered_by_amount > 0 {
        eprintln!(
            "  Filtered out: {} by region, {} by amount",
            s.filtered_by_region, s.filtered_by_amount
        );
    }
    eprintln!("✓ Valid: {} | Invalid: {}", s.final_count, s.invalid);
    Ok(outcome)
}

fn cmd_clean(
    settings: &Settings,
    raw: PathBuf,
    output: Option<PathBuf>,
    filters: FilterArgs,
) -> Result<(), CliError> {
    let filters = filters.into_options()?;
    let outcome = read_and_validate(&raw, &filters)?;
    let output = output.unwrap_or_else(|| settings.paths.cleaned_path());

    if outcome.valid.is_empty() {
        log::warn!(
            "no transactions passed validation; {} will hold only the header",
            output.display()
        );
    }
    save_cleaned_data(&outcome.valid, &output).map_err(CliError::io)?;
    eprintln!("✓ Saved {} transactions to {}", outcome.valid.len(), output.display());
    Ok(())
}

// ============================================================================
// analyze
// ============================================================================

fn print_analysis(report: &AnalyticsReport, config: &AnalyticsConfig, all_days: bool) {
    println!("=== Analysis Summary ===");
    println!("Total Revenue: {}", format_money(report.total_revenue));

    println!();
    println!("--- Region-wise Sales ---");
    print!("{}", tables::region_table(&report.regions));

    println!();
    println!("--- Top {} Products ---", config.top_products);
    print!("{}", tables::product_table(&report.top_products));

    println!();
    println!("--- Top Customers (Top {}) ---", config.top_customers_display);
    print!("{}", tables::customer_table(&report.customers, config.top_customers_display));

    println!();
    if all_days {
        println!("--- Daily Sales Trend ---");
        print!("{}", tables::daily_trend_table(&report.daily_trend, None));
    } else {
        println!("--- Daily Sales Trend (first {} days) ---", config.trend_rows);
        print!("{}", tables::daily_trend_table(&report.daily_trend, Some(config.trend_rows)));
    }

    println!();
    println!("--- Peak Sales Day ---");
    println!("{}", tables::peak_day_line(&report.peak_day));

    println!();
    println!("--- Low Performing Products (qty < {}) ---", report.low_threshold);
    if report.low_performers.is_empty() {
        println!("No products below the specified threshold.");
    } else {
        print!("{}", tables::product_table(&report.low_performers));
    }

    let skipped = &report.skipped;
    if !skipped.is_empty() {
        println!();
        println!(
            "Skipped: {} malformed, {} without product, {} without customer, {} without date",
            skipped.malformed,
            skipped.missing_product,
            skipped.missing_customer,
            skipped.missing_date
        );
    }
}

fn export_summaries(report: &AnalyticsReport, settings: &Settings) -> Result<(), CliError> {
    let written = export_all(report, &settings.paths.output_dir).map_err(CliError::io)?;
    for path in &written {
        eprintln!("✓ Exported {}", path.display());
    }
    Ok(())
}

fn cmd_analyze(
    settings: &Settings,
    cleaned: Option<PathBuf>,
    top_n: Option<usize>,
    low_threshold: Option<i64>,
    all_days: bool,
    export: bool,
    json: bool,
) -> Result<(), CliError> {
    let mut config = settings.analytics.clone();
    if let Some(n) = top_n {
        config.top_products = n;
    }
    if let Some(t) = low_threshold {
        config.low_threshold = t;
    }
    config.validate().map_err(CliError::analytics)?;

    let path = cleaned.unwrap_or_else(|| settings.paths.cleaned_path());
    let transactions = load_cleaned(&path)?;
    let report = analyze(&transactions, &config);

    if json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::general(format!("cannot serialize analytics: {e}")))?;
        println!("{}", text);
    } else {
        print_analysis(&report, &config, all_days);
    }

    if export {
        export_summaries(&report, settings)?;
    }
    Ok(())
}

// ============================================================================
// enrich
// ============================================================================

fn fetch_and_enrich(
    settings: &Settings,
    transactions: &[Transaction],
    catalog_url: &str,
    output: &Path,
) -> Result<EnrichmentSummary, CatalogError> {
    let timeout = Duration::from_secs(settings.catalog.timeout_secs);
    let client = CatalogClient::new(catalog_url, timeout)?;
    let products = client.fetch_all_products()?;
    if products.is_empty() {
        return Err(CatalogError::Empty);
    }
    eprintln!("✓ Fetched {} products from {}", products.len(), client.url());

    let mapping = create_product_mapping(&products);
    let enriched = enrich_sales_data(transactions, &mapping);
    save_enriched_data(&enriched, output)?;

    let summary = summarize_enrichment(&enriched);
    eprintln!(
        "✓ Matched {} of {} transactions ({:.2}%), saved to {}",
        summary.matched,
        summary.total_enriched,
        summary.success_rate,
        output.display()
    );
    Ok(summary)
}

fn cmd_enrich(
    settings: &Settings,
    cleaned: Option<PathBuf>,
    catalog_url: Option<String>,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let path = cleaned.unwrap_or_else(|| settings.paths.cleaned_path());
    let transactions = load_cleaned(&path)?;
    let url = catalog_url.unwrap_or_else(|| settings.catalog.url.clone());
    let output = output.unwrap_or_else(|| settings.paths.enriched_path());

    fetch_and_enrich(settings, &transactions, &url, &output).map_err(CliError::catalog)?;
    Ok(())
}

// ============================================================================
// report
// ============================================================================

/// Enrichment summary for the report. An explicit file must load; the
/// settings default is used only when it exists.
fn load_enrichment(
    explicit: Option<&Path>,
    default: &Path,
) -> Result<Option<EnrichmentSummary>, CliError> {
    let path = match explicit {
        Some(path) => path,
        None if default.is_file() => default,
        None => {
            log::info!("no enriched file at {}", default.display());
            return Ok(None);
        }
    };
    let rows = load_enriched_data(path).map_err(CliError::catalog)?;
    if rows.is_empty() {
        log::warn!("{} has no enriched rows", path.display());
        return Ok(None);
    }
    Ok(Some(summarize_enrichment(&rows)))
}

fn write_report(
    settings: &Settings,
    report: &AnalyticsReport,
    enrichment: Option<&EnrichmentSummary>,
    output: &Path,
) -> Result<(), CliError> {
    let text = report::compose_report(report, enrichment, settings, &now_stamp());
    report::save_report(&text, output).map_err(CliError::io)?;
    eprintln!("✓ Report saved to {}", output.display());
    Ok(())
}

fn cmd_report(
    settings: &Settings,
    cleaned: Option<PathBuf>,
    enriched: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let path = cleaned.unwrap_or_else(|| settings.paths.cleaned_path());
    let transactions = load_cleaned(&path)?;
    let report = analyze(&transactions, &settings.analytics);
    let enrichment = load_enrichment(enriched.as_deref(), &settings.paths.enriched_path())?;
    let output = output.unwrap_or_else(|| settings.paths.report_path());
    write_report(settings, &report, enrichment.as_ref(), &output)
}

// ============================================================================
// run
// ============================================================================

fn cmd_run(
    settings: &Settings,
    raw: Option<PathBuf>,
    filters: FilterArgs,
    skip_enrich: bool,
) -> Result<(), CliError> {
    let filters = filters.into_options()?;
    let raw = raw.unwrap_or_else(|| settings.paths.raw_path());
    let cleaned_path = settings.paths.cleaned_path();
    let enriched_path = settings.paths.enriched_path();
    let report_path = settings.paths.report_path();

    eprintln!("[1/6] Reading and validating {}", raw.display());
    let outcome = read_and_validate(&raw, &filters)?;

    eprintln!("[2/6] Saving cleaned data");
    save_cleaned_data(&outcome.valid, &cleaned_path).map_err(CliError::io)?;
    eprintln!("✓ Saved {} transactions to {}", outcome.valid.len(), cleaned_path.display());

    eprintln!("[3/6] Analyzing sales data");
    let transactions = load_cleaned(&cleaned_path)?;
    let report = analyze(&transactions, &settings.analytics);
    print_analysis(&report, &settings.analytics, false);

    eprintln!("[4/6] Exporting summaries");
    export_summaries(&report, settings)?;

    eprintln!("[5/6] Enriching from product catalog");
    let enrichment = if skip_enrich {
        eprintln!("  skipped (--skip-enrich)");
        None
    } else {
        match fetch_and_enrich(settings, &transactions, &settings.catalog.url, &enriched_path) {
            Ok(summary) => Some(summary),
            Err(err) => {
                eprintln!("⚠ Could not enrich: {err}. Continuing without enrichment.");
                None
            }
        }
    };

    eprintln!("[6/6] Generating report");
    write_report(settings, &report, enrichment.as_ref(), &report_path)?;

    eprintln!("========================================");
    eprintln!("Cleaned data file : {}", cleaned_path.display());
    match enrichment {
        Some(_) => eprintln!("Enriched data file: {}", enriched_path.display()),
        None => eprintln!("Enriched data file: Not generated"),
    }
    eprintln!("Summary CSVs      : {}", settings.paths.output_dir.display());
    eprintln!("Report file       : {}", report_path.display());
    eprintln!("========================================");
    Ok(())
}
