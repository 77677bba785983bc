use anyhow::{bail, Context, Result};
use clap::Parser;
use prettytable::{cell, row, Table};
use reid_dataset::{DatasetConfig, DatasetKind, LabelOrder, ReidDataset};
use std::{env, path::PathBuf};
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};
use train_monitor::MonitorConfig;

#[derive(Debug, Clone, Parser)]
/// Person re-identification dataset and monitor utilities
enum Opts {
    /// List registered datasets
    Datasets,
    /// Scan a dataset and print its statistics
    Scan {
        /// dataset configuration file
        #[clap(long, conflicts_with_all = &["root", "dataset"])]
        config_file: Option<PathBuf>,
        /// data root directory
        #[clap(long, requires = "dataset")]
        root: Option<PathBuf>,
        /// registered dataset name
        #[clap(long, requires = "root")]
        dataset: Option<String>,
        /// append the extra gallery folder to the gallery
        #[clap(long)]
        extra_gallery: bool,
        /// assign training labels in ascending identity order
        #[clap(long)]
        ascending_labels: bool,
    },
    /// Load a monitor configuration file and create the monitors
    CheckMonitors {
        /// monitor configuration file
        config_file: PathBuf,
    },
}

fn main() -> Result<()> {
    // setup tracing
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true).compact();
    let filter_layer = {
        let filter = EnvFilter::from_default_env();
        if env::var("RUST_LOG").is_err() {
            filter.add_directive(LevelFilter::INFO.into())
        } else {
            filter
        }
    };
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    match Opts::parse() {
        Opts::Datasets => {
            list_datasets();
        }
        Opts::Scan {
            config_file,
            root,
            dataset,
            extra_gallery,
            ascending_labels,
        } => {
            let mut config = match (config_file, root, dataset) {
                (Some(config_file), _, _) => DatasetConfig::open(&config_file).with_context(
                    || format!("failed to load config file '{}'", config_file.display()),
                )?,
                (None, Some(root), Some(dataset)) => {
                    DatasetConfig::new(root, DatasetKind::from_name(&dataset)?)
                }
                _ => {
                    bail!("either --config-file or both --root and --dataset are required")
                }
            };
            config.extra_gallery |= extra_gallery;
            if ascending_labels {
                config.label_order = LabelOrder::Ascending;
            }
            scan(&config)?;
        }
        Opts::CheckMonitors { config_file } => {
            check_monitors(config_file)?;
        }
    }

    Ok(())
}

fn list_datasets() {
    let mut table = Table::new();
    table.add_row(row!["name", "dataset_dir", "dataset_subdir"]);
    DatasetKind::all().for_each(|kind| {
        table.add_row(row![kind.name(), kind.dataset_dir(), kind.dataset_subdir()]);
    });
    table.printstd();
}

fn scan(config: &DatasetConfig) -> Result<()> {
    let dataset = ReidDataset::load(config)?;

    let mut table = Table::new();
    table.add_row(row!["subset", "# images", "# ids", "# cameras"]);
    dataset.summary().iter().for_each(|(name, stats)| {
        table.add_row(row![name, stats.num_images, stats.num_pids, stats.num_cams]);
    });
    table.printstd();

    Ok(())
}

fn check_monitors(config_file: PathBuf) -> Result<()> {
    let config = MonitorConfig::open(&config_file)
        .with_context(|| format!("failed to load config file '{}'", config_file.display()))?;
    let mut monitors = config.build();
    info!("metrics: {:?}", config.metrics);
    info!("performance: {:?}", config.performance);
    info!("stop: {:?}", config.stop);

    monitors.metrics.close()?;
    monitors.stop.reset();
    Ok(())
}
