use std::error::Error;

use clap::Parser;
use tracing::{info, Level};

use ferrite_dense::{build_network, Dataset, TrainConfig};

/// Train a dense feedforward network on a JSON dataset.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Dataset file: {"input": [[..]], "output": [[..]]}
    #[arg(short, long, value_name = "PATH")]
    data: String,
    /// Training config (JSON); built-in defaults when omitted
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,
    #[arg(short, long, value_name = "INT")]
    epochs: Option<usize>,
    #[arg(short, long, value_name = "INT")]
    batch_size: Option<usize>,
    #[arg(long, value_name = "FLOAT")]
    learning_rate: Option<f64>,
    /// Where to write the normalization statistics used for the dataset
    #[arg(long, value_name = "PATH")]
    normalization_out: Option<String>,
    /// -v for per-batch losses, -vv for per-layer shapes
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn install_logger(verbose: u8) -> Result<(), Box<dyn Error>> {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    install_logger(cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => TrainConfig::load_json(path)?,
        None => TrainConfig::default(),
    };
    if let Some(epochs) = cli.epochs {
        config.epochs = epochs;
    }
    if let Some(batch_size) = cli.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(learning_rate) = cli.learning_rate {
        config.learning_rate = learning_rate;
    }
    config.validate()?;

    let dataset = Dataset::load_json(&cli.data)?;
    let (mut network, normalization) = build_network(&config, dataset)?;

    if let Some(path) = &cli.normalization_out {
        normalization.save_json(path)?;
        info!(path = %path, "wrote normalization statistics");
    }

    let history = network.train_epochs(config.epochs)?;
    if let Some(last) = history.last() {
        info!(epochs = history.len(), final_loss = last.mean_loss, "training complete");
    }

    Ok(())
}
