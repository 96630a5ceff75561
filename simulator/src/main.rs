use anyhow::Context;
use bridge::BridgeState;
use chrono::Utc;
use clap::Parser;
use remote::ClassifierClient;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::DashboardConfig;
use workflow::runner::Runner;

mod bridge;
mod remote;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Waste classification dashboard driver")]
struct Args {
    /// Classify a batch (or the given labels) offline and write exports
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a dashboard config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 20)]
    batch: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Image labels to classify instead of a generated batch
    #[arg(long = "label")]
    labels: Vec<String>,
    /// Keep the HTTP dashboard bridge alive
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long)]
    classifier_url: Option<String>,
    /// Send an image file to the remote classifier
    #[arg(long)]
    image: Option<PathBuf>,
    /// Start from the seed dataset, discarding the saved snapshot
    #[arg(long, default_value_t = false)]
    reset: bool,
    #[arg(long)]
    export_dir: Option<PathBuf>,
    /// Print the remote classifier's training status
    #[arg(long, default_value_t = false)]
    training_status: bool,
    /// Submit `<dir>/<label>/<image>` files to the remote classifier for training
    #[arg(long)]
    train: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = &args.config {
        DashboardConfig::load(path)?
    } else {
        DashboardConfig::from_args(args.batch, args.seed, None)
    };
    if let Some(url) = args.classifier_url.clone() {
        config.classifier.base_url = url;
    }
    if let Some(dir) = args.export_dir.clone() {
        config.export_dir = dir;
    }

    let runner = Arc::new(Runner::new(config.clone()));
    let store = runner.open_store(args.reset)?;
    let classifier = Arc::new(
        ClassifierClient::new(&config.classifier).context("building classifier client")?,
    );

    if args.image.is_some() || args.train.is_some() || args.training_status || args.serve {
        let runtime = TokioBuilder::new_multi_thread()
            .enable_all()
            .build()
            .context("creating tokio runtime")?;

        if let Some(path) = &args.image {
            let bytes =
                fs::read(path).with_context(|| format!("reading image {}", path.display()))?;
            match runtime.block_on(classifier.classify(&bytes)) {
                Ok(response) => {
                    let record =
                        response.into_record(Some(path.display().to_string()), Utc::now());
                    println!(
                        "{} -> {} ({}, {:.1}%)",
                        path.display(),
                        record.waste_type,
                        record.category,
                        record.accuracy
                    );
                    store.with(|store| store.add_classification(record));
                    runner.persist(&store)?;
                }
                Err(err) => eprintln!("classification failed, store unchanged: {}", err),
            }
        }

        if let Some(dir) = &args.train {
            let samples = remote::training::collect_samples(dir)?;
            let reply = runtime.block_on(classifier.train_model(&samples));
            println!(
                "training submission of {} images: success={} message={}",
                samples.len(),
                reply.success,
                reply.message
            );
        }

        if args.training_status {
            let status = runtime.block_on(classifier.training_status());
            println!(
                "training={} progress={:.0}% message={}",
                status.is_training, status.progress, status.message
            );
        }

        if args.serve {
            let state = BridgeState::new(store.clone(), runner.clone(), classifier.clone());
            let period = Duration::from_secs(runner.config().refresh_interval_secs.max(1));
            runtime.block_on(async {
                if !classifier.check_availability().await {
                    log::warn!(
                        "classifier at {} is not reachable; /upload will fail",
                        config.classifier.base_url
                    );
                }
                let refresher = tokio::spawn(bridge::refresh_loop(store.clone(), period));
                let shutdown = async {
                    if let Err(err) = signal::ctrl_c().await {
                        log::error!("awaiting Ctrl+C failed: {}", err);
                    }
                };
                let served = bridge::serve(state, config.bind_address, shutdown).await;
                refresher.abort();
                served
            })?;
            runner.persist(&store)?;
        }
    }

    if args.offline {
        let summary = runner.execute(&store, &args.labels)?;

        println!(
            "Offline run -> classified {}, total {}, recyclable {}, biodegradable {}, non-recyclable {}",
            summary.classified.len(),
            summary.stats.total_classified,
            summary.stats.recyclable,
            summary.stats.biodegradable,
            summary.stats.non_recyclable
        );
        println!(
            "Exports written to {} and {}",
            summary.csv_path.display(),
            summary.report_path.display()
        );

        let report = format!(
            "classified={} total={} recyclable={} biodegradable={} non_recyclable={}\n",
            summary.classified.len(),
            summary.stats.total_classified,
            summary.stats.recyclable,
            summary.stats.biodegradable,
            summary.stats.non_recyclable
        );
        let report_path = PathBuf::from("tools/data/offline_run.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(report.as_bytes())?;
    }

    Ok(())
}
