// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// The flags of the single `extractive-qa` command.
//
// Model and tokenizer are optional here: when omitted, the
// value from extractive-qa.toml / EXTRACTIVE_QA_* applies, and
// failing that the SQuAD checkpoint default.

use clap::Args;
use std::path::PathBuf;

use crate::infra::config::AppConfig;

#[derive(Args, Debug, Clone, Default)]
pub struct QaArgs {
    /// Pretrained model: hub identifier or local directory
    /// [default: bert-large-uncased-whole-word-masking-finetuned-squad]
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Pretrained tokenizer: hub identifier or local directory
    /// [default: bert-large-uncased-whole-word-masking-finetuned-squad]
    #[arg(short = 't', long)]
    pub tokenizer: Option<String>,

    /// Text file holding the context passage (also -cf)
    #[arg(long, visible_alias = "context_file", conflicts_with = "context")]
    pub context_file: Option<PathBuf>,

    /// Context passage given inline
    #[arg(short = 'c', long)]
    pub context: Option<String>,

    /// Settings file [default: ./extractive-qa.toml when present]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for downloaded checkpoints
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Never contact the hub; use local directories and the cache only
    #[arg(long)]
    pub offline: bool,
}

impl QaArgs {
    /// Command-line values take precedence over every other layer.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(model) = &self.model {
            config.model.name = model.clone();
        }
        if let Some(tokenizer) = &self.tokenizer {
            config.model.tokenizer = tokenizer.clone();
        }
        if let Some(dir) = &self.cache_dir {
            config.hub.cache_dir = Some(dir.clone());
        }
        if self.offline {
            config.hub.offline = true;
        }
    }
}
