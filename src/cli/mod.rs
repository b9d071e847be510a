// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses the flags with
// clap, builds the QA system through Layer 2, then hands
// stdin/stdout to the interactive session.
//
//   extractive-qa -c "The Eiffel Tower is..."
//   extractive-qa -cf passage.txt -m ./my-squad-model

pub mod args;
pub mod commands;
pub mod session;

use anyhow::{Context, Result};
use clap::Parser;
use commands::QaArgs;
use session::Session;

use crate::application::setup_use_case::SetupUseCase;
use crate::data::loader::ContextLoader;
use crate::infra::config::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "extractive-qa",
    version,
    about = "Answer questions about a passage with a pretrained BERT SQuAD model."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: QaArgs,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        // Context choice is validated before any configuration or
        // model work happens.
        let context = ContextLoader::from_choice(
            self.args.context_file.clone(),
            self.args.context.clone(),
        )?;

        let mut config = AppConfig::load(self.args.config.as_deref())?;
        self.args.apply_to(&mut config);
        tracing::info!("Context from {}", context.describe());

        let use_case = SetupUseCase::new(config, context);
        let system = use_case.execute().with_context(|| {
            format!(
                "failed to set up model '{}' with tokenizer '{}'",
                use_case.config().model.name,
                use_case.config().model.tokenizer
            )
        })?;

        println!(
            "Using model: {} and tokenizer: {}",
            use_case.config().model.name,
            use_case.config().model.tokenizer
        );

        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        Session::new(&system).run(stdin.lock(), stdout.lock())?;
        Ok(())
    }
}
