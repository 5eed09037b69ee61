mod error;
mod extract;
mod fetch;
mod images;
mod pipeline;
mod settings;
mod sheet;
mod text;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use extract::Extractor;
use fetch::Fetcher;
use images::ImageStore;
use pipeline::Pipeline;
use settings::Settings;
use sheet::Workbook;

#[derive(Parser)]
#[command(
    name = "shop_parser",
    about = "Fill a product workbook from the product pages it links to"
)]
struct Cli {
    /// Settings file (TOML); ignored when missing
    #[arg(short, long, global = true, default_value = "shop_parser.toml")]
    config: PathBuf,

    /// Accept invalid TLS certificates
    #[arg(long, global = true)]
    insecure: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every URL row of the workbook
    Run {
        /// Workbook to read and update
        #[arg(short, long)]
        workbook: Option<PathBuf>,
        /// Worksheet name
        #[arg(short, long)]
        sheet: Option<String>,
        /// Max rows to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Do not download product images
        #[arg(long)]
        no_images: bool,
    },
    /// Fetch one product page and print the extracted fields as JSON
    Extract {
        url: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.config)
        .with_context(|| format!("loading settings from {:?}", cli.config))?;
    if cli.insecure {
        settings.verify_tls = false;
    }

    let result = match cli.command {
        Commands::Run {
            workbook,
            sheet,
            limit,
            no_images,
        } => {
            if let Some(path) = workbook {
                settings.workbook = path;
            }
            if let Some(name) = sheet {
                settings.sheet = name;
            }
            if no_images {
                settings.download_images = false;
            }
            run(&settings, limit)
        }
        Commands::Extract { url } => extract_one(&settings, &url),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn run(settings: &Settings, limit: Option<usize>) -> Result<()> {
    info!(settings = ?settings, "Starting product parser");

    let extractor = Extractor::new(&settings.selectors, settings.images_prefix())?;
    let fetcher = Fetcher::new(settings)?;
    info!(user_agent = fetcher.user_agent(), "HTTP client");
    let images = if settings.download_images {
        let store = ImageStore::new(&settings.images_dir)?;
        info!("Images: {:?}", store.dir());
        Some(store)
    } else {
        None
    };

    let mut workbook = Workbook::open(&settings.workbook, &settings.sheet, settings.columns.clone())?;
    println!("Workbook: {:?} [{}]", workbook.path(), settings.sheet);

    let mut rows = workbook.source_rows(settings.first_row, settings.url_column)?;
    if let Some(n) = limit {
        rows.truncate(n);
    }
    if rows.is_empty() {
        println!("No URLs found in column {}.", settings.url_column);
        return Ok(());
    }
    println!("Processing {} rows...", rows.len());

    let pipeline = Pipeline {
        fetcher: &fetcher,
        extractor: &extractor,
        images: images.as_ref(),
    };
    let stats = pipeline.run(&mut workbook, &rows)?;
    stats.print();
    Ok(())
}

fn extract_one(settings: &Settings, url: &str) -> Result<()> {
    let extractor = Extractor::new(&settings.selectors, settings.images_prefix())?;
    let fetcher = Fetcher::new(settings)?;
    let page = fetcher.get_page(url)?;
    info!(status = page.status, url = %page.url, "Fetched");
    let record = extractor.extract(&page.body, &page.url);
    if record.has_ambiguous_code() {
        tracing::warn!(codes = ?record.ware_codes, "Two identifiers for one product?");
    }
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
