mod remote;
mod render;

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use datagrid_lib::config::ColumnDef;
use datagrid_lib::export::{CsvWriter, JsonWriter, TableWriter};
use datagrid_lib::model::Record;
use datagrid_lib::remote::{LoadOutcome, PageLoader, PageRequest};
use datagrid_lib::selection::RowIdentity;
use datagrid_lib::{DataTable, TableConfig};
use log::{info, warn};
use simplelog::{Config, LevelFilter, SimpleLogger, WriteLogger};

use remote::DelayedSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "datagrid")]
#[command(about = "Sort, page, select and export tabular JSON records")]
struct Args {
    /// JSON file holding an array of objects
    #[arg(short, long)]
    records: PathBuf,

    /// TOML table config (title, page size, columns, row identity)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page to show, 1-based. Out of range pages are clamped.
    #[arg(short, long, default_value = "1")]
    page: usize,

    /// Rows per page, overrides the config
    #[arg(long)]
    page_size: Option<usize>,

    /// Toggle the sort on a column. Repeat to cycle asc, desc, none.
    #[arg(short, long)]
    sort: Vec<String>,

    /// Hide a column
    #[arg(long)]
    hide: Vec<String>,

    /// Select the row with this id
    #[arg(long, conflicts_with = "select_all")]
    select: Vec<String>,

    /// Select every row of the dataset
    #[arg(long)]
    select_all: bool,

    /// Field that identifies a row. Repeat for composite ids.
    #[arg(long)]
    id_field: Vec<String>,

    /// Export the whole dataset into this directory
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Export file format
    #[arg(long, value_enum, default_value = "csv")]
    format: Format,

    /// Serve pages through a simulated remote source with a page cache
    #[arg(long)]
    remote: bool,

    /// Simulated remote latency in milliseconds
    #[arg(long, default_value = "300", requires = "remote")]
    latency_ms: u64,

    /// Write logs to this file instead of the terminal
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// More logging. Repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(args: &Args) -> Result<()> {
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            WriteLogger::init(level, Config::default(), file)?;
        }
        None => SimpleLogger::init(level, Config::default())?,
    }
    Ok(())
}

fn load_records(path: &Path) -> Result<Vec<Record>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open records {}", path.display()))?;
    let records: Vec<Record> = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to parse records {}", path.display()))?;
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn load_config(args: &Args, records: &[Record]) -> Result<TableConfig> {
    let mut config = match &args.config {
        Some(path) => TableConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TableConfig::default(),
    };

    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
        config.validate()?;
    }

    if config.columns.is_empty() {
        let mut fields: Vec<&String> = records.iter().flat_map(|r| r.fields().keys()).collect();
        fields.sort();
        fields.dedup();
        info!("No columns configured, using {} record fields", fields.len());
        config.columns = fields.into_iter().map(ColumnDef::new).collect();
    }

    if !args.id_field.is_empty() {
        config.id_fields = args.id_field.clone();
    }

    Ok(config)
}

fn row_identity(config: &TableConfig) -> RowIdentity<Record> {
    config.row_identity().unwrap_or_else(|| {
        warn!("No id fields configured, identifying rows by every column");
        RowIdentity::fields(config.columns.iter().map(|c| c.field.clone()))
    })
}

fn writer(format: Format) -> Box<dyn TableWriter> {
    match format {
        Format::Csv => Box::new(CsvWriter::new()),
        Format::Tsv => Box::new(CsvWriter::new().with_delimiter(b'\t')),
        Format::Json => Box::new(JsonWriter::new().pretty()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let records = load_records(&args.records)?;
    let config = load_config(&args, &records)?;
    let mut table = DataTable::from_config(&config, row_identity(&config))
        .context("Invalid table config")?;
    table.dataset_changed(records.len());

    for column in &args.hide {
        if let Err(e) = table.set_column_visible(column, false) {
            warn!("Cannot hide column: {}", e);
        }
    }

    for column in &args.sort {
        match table.toggle_sort(column) {
            Ok(sort) => info!("Sort is now {:?}", sort),
            Err(e) => warn!("Cannot sort: {}", e),
        }
    }

    if args.select_all {
        table.select_all(&records);
    }
    for id in &args.select {
        let identity = table.selection().identity().clone();
        match records.iter().find(|r| identity.id_of(r) == *id) {
            Some(record) => {
                table.select_row(record);
            }
            None => warn!("No row with id '{}'", id),
        }
    }

    if args.page == 0 {
        bail!("Pages are numbered from 1");
    }
    table.goto_page(args.page - 1);

    if args.remote {
        show_remote(&args, &config, &mut table, &records).await?;
    } else {
        let view = table.view(&records);
        let padding_height = config.padding_height(view.padding_rows);
        print!("{}", render::render(&config.title, &view, padding_height));
    }

    if let Some(dir) = &args.export {
        let job = table.export(&records, config.title.as_str());
        let path = writer(args.format)
            .write_to_dir(&job, dir)
            .with_context(|| format!("Failed to export into {}", dir.display()))?;
        println!("Exported {} rows to {}", job.grid.height(), path.display());
    }

    Ok(())
}

/// Show the current page the way a remote-backed grid would: only the
/// requested page is resident and the total comes from the source.
async fn show_remote(
    args: &Args,
    config: &TableConfig,
    table: &mut DataTable<Record>,
    records: &[Record],
) -> Result<()> {
    // The simulated server applies the sort itself
    let sorted: Vec<Record> = table.sorted(records).into_iter().cloned().collect();
    let source = DelayedSource::new(sorted, args.latency_ms);
    let loader = PageLoader::new(source, config.cache.clone());

    let page_size = table.page().page_size();
    loop {
        let page_index = table.page().page_index();
        let request = PageRequest::new(page_index, page_size);
        let Some(page) = loader.load(request).await?.into_page() else {
            continue;
        };

        table.dataset_changed(page.total_count());
        if table.page().page_index() != page_index {
            // Requested page did not exist, fetch the clamped one
            continue;
        }

        let view = table.view_resident(page.records(), page.total_count());
        let padding_height = config.padding_height(view.padding_rows);
        print!("{}", render::render(&config.title, &view, padding_height));
        break;
    }

    // Revisiting the page is answered from the cache unless caching is off
    let request = PageRequest::new(table.page().page_index(), page_size);
    let cached = matches!(loader.load(request).await?, LoadOutcome::Cached(_));
    info!(
        "Revisit of page {}: {}, {} pages cached",
        request.page_index + 1,
        if cached { "cache hit" } else { "fetched" },
        loader.cache().len()
    );
    Ok(())
}
