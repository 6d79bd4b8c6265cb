//! Postag command line
//!
//! Trains, evaluates and interactively runs a hidden Markov model tagger.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use postag_core::{DecoderConfig, Model, UNSEEN_PENALTY, ViterbiDecoder};
use postag_trainer::{evaluate_files, run_console, train_from_files};
use tracing::info;

/// CLI arguments
#[derive(Parser)]
#[command(name = "postag")]
#[command(about = "Train and run a hidden Markov model part-of-speech tagger")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log-probability charged when a word was never seen with a tag
    #[arg(
        long,
        global = true,
        env = "POSTAG_UNSEEN_PENALTY",
        default_value_t = UNSEEN_PENALTY,
        allow_negative_numbers = true
    )]
    unseen_penalty: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model from parallel sentence/tag files
    Train {
        /// Sentence file, one sentence per line
        #[arg(short, long)]
        sentences: PathBuf,
        /// Tag file, line-aligned with the sentence file
        #[arg(short, long)]
        tags: PathBuf,
        /// Where to write the model
        #[arg(short, long, env = "POSTAG_MODEL", default_value = "model.json")]
        output: PathBuf,
    },
    /// Report tagging accuracy of a saved model on a test corpus
    Evaluate {
        /// Model file written by `train`
        #[arg(short, long, env = "POSTAG_MODEL")]
        model: PathBuf,
        /// Test sentence file
        #[arg(short, long)]
        sentences: PathBuf,
        /// Gold-standard tag file
        #[arg(short, long)]
        tags: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Tag sentences typed on standard input
    Tag {
        /// Model file written by `train`
        #[arg(short, long, env = "POSTAG_MODEL")]
        model: PathBuf,
    },
    /// Train in memory, evaluate, then optionally open the console
    Run {
        #[arg(long)]
        train_sentences: PathBuf,
        #[arg(long)]
        train_tags: PathBuf,
        #[arg(long)]
        test_sentences: PathBuf,
        #[arg(long)]
        test_tags: PathBuf,
        /// Start the interactive console after evaluation
        #[arg(long)]
        console: bool,
    },
}

fn load_model(path: &Path) -> Result<Model> {
    Model::load(path).with_context(|| format!("failed to load model from {}", path.display()))
}

fn console(decoder: &ViterbiDecoder, model: &Model) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let tagged = run_console(decoder, model, stdin.lock(), stdout.lock())?;
    info!(tagged, "console closed");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let decoder =
        ViterbiDecoder::new(DecoderConfig::new().with_unseen_penalty(cli.unseen_penalty));

    match cli.command {
        Commands::Train {
            sentences,
            tags,
            output,
        } => {
            info!("Training model from {}", sentences.display());
            let model = train_from_files(&sentences, &tags)?;
            model
                .save(&output)
                .with_context(|| format!("failed to save model to {}", output.display()))?;
            info!("Model saved to {}", output.display());
        }
        Commands::Evaluate {
            model,
            sentences,
            tags,
            json,
        } => {
            let model = load_model(&model)?;
            let evaluation = evaluate_files(&decoder, &model, &sentences, &tags)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&evaluation.summary())?);
            } else {
                println!("{evaluation}");
            }
        }
        Commands::Tag { model } => {
            let model = load_model(&model)?;
            console(&decoder, &model)?;
        }
        Commands::Run {
            train_sentences,
            train_tags,
            test_sentences,
            test_tags,
            console: interactive,
        } => {
            let model = train_from_files(&train_sentences, &train_tags)?;
            let evaluation = evaluate_files(&decoder, &model, &test_sentences, &test_tags)?;
            println!("{evaluation}");
            if interactive {
                console(&decoder, &model)?;
            }
        }
    }

    Ok(())
}
