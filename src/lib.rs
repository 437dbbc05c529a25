pub mod aggregate;
pub mod cli;
pub mod context;
pub mod data;
pub mod dataset;
pub mod infer;
pub mod insights;
pub mod io_utils;
pub mod stats;
pub mod table;

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands},
    data::format_number,
    dataset::Dataset,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_insight", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Probe(args) => handle_probe(&args),
        Commands::Preview(args) => handle_preview(&args),
        Commands::Stats(args) => handle_stats(&args),
        Commands::Aggregate(args) => handle_aggregate(&args),
        Commands::Distribution(args) => handle_distribution(&args),
        Commands::Insights(args) => handle_insights(&args),
        Commands::Context(args) => handle_context(&args),
        Commands::Top(args) => handle_top(&args),
    }
}

fn handle_probe(args: &cli::ProbeArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let (headers, raw_rows) = dataset::read_raw(&args.input, delimiter, encoding, args.limit)
        .with_context(|| format!("Reading {:?}", args.input))?;
    let (_, profiles) = Dataset::from_raw_with_profiles(headers, raw_rows)
        .with_context(|| format!("Ingesting {:?}", args.input))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
    } else {
        let table_headers = vec![
            "column".to_string(),
            "type".to_string(),
            "non_empty".to_string(),
            "numeric_fraction".to_string(),
        ];
        let rows = profiles
            .iter()
            .map(|profile| {
                vec![
                    profile.name.clone(),
                    match profile.kind {
                        infer::ColumnKind::Numeric => "numeric".to_string(),
                        infer::ColumnKind::Categorical => "categorical".to_string(),
                    },
                    profile.non_empty.to_string(),
                    format!("{:.2}", profile.numeric_fraction()),
                ]
            })
            .collect::<Vec<_>>();
        table::print_table(&table_headers, &rows);
    }
    info!(
        "Classified {} column(s) from {:?}",
        profiles.len(),
        args.input
    );
    Ok(())
}

fn handle_preview(args: &cli::PreviewArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let (headers, rows) = dataset::read_raw(&args.input, delimiter, encoding, args.rows)
        .with_context(|| format!("Reading {:?}", args.input))?;
    table::print_table(&headers, &rows);
    info!("Displayed {} row(s) from {:?}", rows.len(), args.input);
    Ok(())
}

fn handle_stats(args: &cli::StatsArgs) -> Result<()> {
    let dataset = load_dataset(
        &args.input,
        args.delimiter,
        args.input_encoding.as_deref(),
        args.limit,
    )?;

    let stats = if args.columns.is_empty() {
        let stats = stats::describe_numeric_columns(&dataset);
        if stats.is_empty() {
            return Err(anyhow!(
                "No numeric columns available. Supply --columns to continue."
            ));
        }
        stats
    } else {
        args.columns
            .iter()
            .map(|name| {
                if dataset.column_index(name).is_none() {
                    return Err(anyhow!("Column '{name}' not found in dataset"));
                }
                stats::describe(&dataset, name).ok_or_else(|| {
                    anyhow!("Column '{name}' is categorical and cannot be profiled for statistics")
                })
            })
            .collect::<Result<Vec<_>>>()?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        let headers = vec![
            "column".to_string(),
            "count".to_string(),
            "min".to_string(),
            "max".to_string(),
            "mean".to_string(),
            "std_dev".to_string(),
            "outliers".to_string(),
        ];
        let rows = stats
            .iter()
            .map(|stat| {
                vec![
                    stat.column.clone(),
                    dataset.row_count().to_string(),
                    format_number(stat.min),
                    format_number(stat.max),
                    format_number(stat.mean),
                    format_number(stat.std_dev),
                    stat.outlier_count.to_string(),
                ]
            })
            .collect::<Vec<_>>();
        table::print_table(&headers, &rows);
    }
    info!("Computed summary statistics for {} column(s)", stats.len());
    Ok(())
}

fn handle_aggregate(args: &cli::AggregateArgs) -> Result<()> {
    let dataset = load_dataset(
        &args.input,
        args.delimiter,
        args.input_encoding.as_deref(),
        args.limit,
    )?;
    let group_by = resolve_categorical(&dataset, &args.group_by)?;
    let value = resolve_numeric(&dataset, &args.value)?;

    let options = aggregate::AggregateOptions {
        reduction: args.reduce,
        limit: args.top,
        key_width: args.key_width,
    };
    let groups = aggregate::aggregate(&dataset, group_by, value, &options);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else {
        let headers = vec![
            "key".to_string(),
            "value".to_string(),
            "count".to_string(),
            "min".to_string(),
            "max".to_string(),
        ];
        let rows = groups
            .iter()
            .map(|group| {
                vec![
                    group.key.clone(),
                    format_number(group.value),
                    group.count.to_string(),
                    format_number(group.min),
                    format_number(group.max),
                ]
            })
            .collect::<Vec<_>>();
        table::print_table(&headers, &rows);
    }
    info!(
        "Aggregated '{}' by '{}' into {} group(s)",
        args.value,
        args.group_by,
        groups.len()
    );
    Ok(())
}

fn handle_distribution(args: &cli::DistributionArgs) -> Result<()> {
    let dataset = load_dataset(
        &args.input,
        args.delimiter,
        args.input_encoding.as_deref(),
        args.limit,
    )?;
    let group_by = resolve_categorical(&dataset, &args.group_by)?;
    let groups = aggregate::distribution(&dataset, group_by, args.top, args.key_width);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else {
        let headers = vec![
            "value".to_string(),
            "count".to_string(),
            "percent".to_string(),
        ];
        let rows = groups
            .iter()
            .map(|group| {
                vec![
                    group.key.clone(),
                    group.count.to_string(),
                    format!("{:.1}%", group.percentage),
                ]
            })
            .collect::<Vec<_>>();
        table::print_table(&headers, &rows);
    }
    info!(
        "Computed frequency distribution for '{}' ({} group(s))",
        args.group_by,
        groups.len()
    );
    Ok(())
}

fn handle_insights(args: &cli::InsightsArgs) -> Result<()> {
    let dataset = load_dataset(
        &args.input,
        args.delimiter,
        args.input_encoding.as_deref(),
        args.limit,
    )?;
    let findings = insights::synthesize(&dataset);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    } else {
        for insight in &findings {
            println!("[{}] {}: {}", insight.severity, insight.title, insight.message);
        }
    }
    info!("Synthesized {} insight(s)", findings.len());
    Ok(())
}

fn handle_context(args: &cli::ContextArgs) -> Result<()> {
    let dataset = load_dataset(
        &args.input,
        args.delimiter,
        args.input_encoding.as_deref(),
        args.limit,
    )?;
    let text = context::chat_context(&dataset, args.preview_rows)?;
    print!("{text}");
    info!(
        "Generated chat context for {} row(s), {} column(s)",
        dataset.row_count(),
        dataset.headers.len()
    );
    Ok(())
}

fn handle_top(args: &cli::TopArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let dataset = load_dataset(
        &args.input,
        args.delimiter,
        args.input_encoding.as_deref(),
        args.limit,
    )?;
    let by = match &args.by {
        Some(name) => name.clone(),
        None => dataset
            .numeric_columns
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("No numeric columns available to rank by"))?,
    };
    let index = resolve_numeric(&dataset, &by)?;
    let ranked = dataset.top_rows(index, args.rows);

    if let Some(output) = &args.output {
        let mut writer = io_utils::open_csv_writer(Some(output), delimiter)?;
        writer
            .write_record(&dataset.headers)
            .context("Writing header row")?;
        for row in &ranked {
            let record: Vec<String> = row.iter().map(|cell| cell.as_display()).collect();
            writer.write_record(&record).context("Writing ranked row")?;
        }
        writer.flush().context("Flushing output")?;
        info!(
            "Wrote top {} row(s) by '{}' to {:?}",
            ranked.len(),
            by,
            output
        );
    } else {
        let rows = ranked
            .iter()
            .map(|row| row.iter().map(|cell| cell.as_display()).collect())
            .collect::<Vec<Vec<String>>>();
        table::print_table(&dataset.headers, &rows);
        info!("Displayed top {} row(s) by '{}'", rows.len(), by);
    }
    Ok(())
}

fn load_dataset(
    input: &Path,
    delimiter: Option<u8>,
    encoding_label: Option<&str>,
    limit: usize,
) -> Result<Dataset> {
    let delimiter = io_utils::resolve_input_delimiter(input, delimiter);
    let encoding = io_utils::resolve_encoding(encoding_label)?;
    Dataset::load(input, delimiter, encoding, limit)
}

fn resolve_categorical(dataset: &Dataset, name: &str) -> Result<usize> {
    let index = dataset
        .column_index(name)
        .ok_or_else(|| anyhow!("Column '{name}' not found in dataset"))?;
    if dataset.is_numeric(name) {
        return Err(anyhow!(
            "Column '{name}' is numeric and cannot be used for grouping"
        ));
    }
    Ok(index)
}

fn resolve_numeric(dataset: &Dataset, name: &str) -> Result<usize> {
    let index = dataset
        .column_index(name)
        .ok_or_else(|| anyhow!("Column '{name}' not found in dataset"))?;
    if !dataset.is_numeric(name) {
        return Err(anyhow!(
            "Column '{name}' is categorical and cannot be reduced numerically"
        ));
    }
    Ok(index)
}
