// Review Sentiment Engine - command-line entry point

use anyhow::{bail, Context};
use review_sentiment::fs_manager::PortablePathManager;
use review_sentiment::{SentimentAnalyzer, SentimentConfig, TrainingExample};
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: review-sentiment <analyze TEXT | detailed TEXT | retrain [EXAMPLES.json] | status>";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_examples(path: &Path) -> anyhow::Result<Vec<TrainingExample>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read training examples from {:?}", path))?;
    let examples: Vec<TrainingExample> =
        serde_json::from_str(&raw).with_context(|| format!("invalid examples file {:?}", path))?;
    Ok(examples)
}

fn run(args: &[String]) -> anyhow::Result<()> {
    let Some(command) = args.first() else {
        bail!(USAGE);
    };

    let config = SentimentConfig::load().context("failed to load configuration")?;
    info!(
        "Configuration: use_ml_sentiment={}, model_path={:?}",
        config.use_ml_sentiment, config.model_path
    );

    if config.model_path == PortablePathManager::default_model_path() {
        PortablePathManager::init().context("failed to initialize data directory")?;
    }

    let analyzer = SentimentAnalyzer::from_config(&config);
    let text = args[1..].join(" ");

    match command.as_str() {
        "analyze" => {
            println!("{}", analyzer.analyze(&text));
        }
        "detailed" => {
            let result = analyzer.analyze_detailed(&text);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        "retrain" => {
            let extra = match args.get(1) {
                Some(path) => read_examples(Path::new(path))?,
                None => Vec::new(),
            };
            match analyzer.retrain(&extra)? {
                Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
                None => bail!("machine learning is disabled; nothing to retrain"),
            }
        }
        "status" => {
            println!("{}", serde_json::to_string_pretty(&analyzer.status())?);
        }
        other => bail!("unknown command '{}'\n{}", other, USAGE),
    }

    Ok(())
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
