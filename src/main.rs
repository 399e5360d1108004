//! Pose coach command-line tool: build reference poses and coach against them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use pose_coach::{
    app::{CoachApp, ComparisonOutcome},
    config::{Config, EXAMPLE_CONFIG},
    reference::ReferencePose,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Average landmark dumps into a reference pose file
    Reference {
        /// Name of the pose, also used for the output file name
        #[arg(short, long)]
        name: String,

        /// Output path (defaults to <name>_reference.json in the configured directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Landmark dump files, one per sample image
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Compare a landmark dump against a reference pose
    Compare {
        /// Reference pose file
        #[arg(short, long)]
        reference: PathBuf,

        /// Override the angle tolerance in degrees
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Print feedback as JSON
        #[arg(long)]
        json: bool,

        /// Landmark dump of the user's pose
        input: PathBuf,
    },

    /// Print the feature vector of a landmark dump
    Features {
        /// Landmark dump file
        input: PathBuf,
    },

    /// Write an example configuration file
    InitConfig {
        /// Destination path
        #[arg(default_value = "pose_coach.yaml")]
        path: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    match args.command {
        Command::Reference { name, output, inputs } => {
            let mut app = CoachApp::new(config)?;
            let reference = app.build_reference(&name, &inputs)?;
            let path = match output {
                Some(path) => {
                    reference.to_file(&path)?;
                    path
                }
                None => app.save_reference(&reference)?,
            };
            println!("{}", reference.to_json()?);
            println!("Average pose saved to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Compare {
            reference,
            threshold,
            json,
            input,
        } => {
            if let Some(threshold) = threshold {
                config.comparison.threshold_degrees = threshold;
            }
            let reference = ReferencePose::from_file(&reference)
                .with_context(|| format!("Failed to load reference {}", reference.display()))?;
            let mut app = CoachApp::new(config)?;

            let outcome = app.compare(&reference, &input)?;
            match &outcome {
                ComparisonOutcome::NoPose => println!("No pose detected in {}", input.display()),
                ComparisonOutcome::Feedback(feedback) if json => {
                    println!("{}", serde_json::to_string_pretty(feedback)?);
                }
                ComparisonOutcome::Feedback(feedback) if feedback.is_empty() => {
                    println!("Pose matches '{}'. Hold steady!", reference.pose_name);
                }
                ComparisonOutcome::Feedback(feedback) => {
                    for (joint, record) in feedback {
                        println!("{joint}: {}", record.message_en);
                    }
                }
            }

            Ok(if outcome.is_match() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Features { input } => {
            let mut app = CoachApp::new(config)?;
            let features = app.features(&input)?;
            println!("Feature vector length: {}", features.len());
            println!("First 10 features: {:?}", &features[..features.len().min(10)]);
            Ok(ExitCode::SUCCESS)
        }
        Command::InitConfig { path } => {
            std::fs::write(&path, EXAMPLE_CONFIG)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Example configuration written to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}
