// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `sample`  — draws a reproducible subset from the corpus
//   2. `augment` — derives image variants for that subset
//   3. `ask`     — answers questions about an image with the model

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{AskArgs, AugmentArgs, Commands, SampleArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "gqa-vqa",
    version = "0.1.0",
    about = "Sample a GQA subset, augment its images, and answer visual questions with a ViLT-style checkpoint."
)]
pub struct Cli {
    /// The subcommand to run (sample, augment or ask)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Sample(args)  => Self::run_sample(args),
            Commands::Augment(args) => Self::run_augment(args),
            Commands::Ask(args)     => Self::run_ask(args),
        }
    }

    /// Handles the `sample` subcommand.
    fn run_sample(args: SampleArgs) -> Result<()> {
        use crate::application::sample_use_case::SampleUseCase;

        tracing::info!("Sampling subset from: {}", args.corpus_file.display());

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = SampleUseCase::new(args.into());
        let output = use_case.execute()?;

        println!("Subset saved to: {}", output.display());
        Ok(())
    }

    /// Handles the `augment` subcommand.
    fn run_augment(args: AugmentArgs) -> Result<()> {
        use crate::application::augment_use_case::AugmentUseCase;

        tracing::info!("Augmenting subset: {}", args.subset_file.display());

        let use_case = AugmentUseCase::new(args.into());
        let output = use_case.execute()?;

        println!("Augmented subset saved to: {}", output.display());
        Ok(())
    }

    /// Handles the `ask` subcommand.
    /// Runs one inference session and prints where the transcript went.
    fn run_ask(args: AskArgs) -> Result<()> {
        use crate::application::ask_use_case::AskUseCase;

        let use_case = AskUseCase::new(args.into());
        let session_file = use_case.execute()?;

        println!("Session log saved to: {}", session_file.display());
        Ok(())
    }
}
