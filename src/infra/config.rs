// ============================================================
// Layer 6 — Configuration
// ============================================================
// Settings are merged from several sources, lowest priority
// first:
//
//   1. built-in defaults           (AppConfig::default)
//   2. TOML file                   (--config, or ./extractive-qa.toml)
//   3. environment                 (EXTRACTIVE_QA_HUB__OFFLINE=true, ...)
//   4. CLI flags                   (applied by the cli layer)
//
// Example file:
//
//   [model]
//   name      = "bert-large-uncased-whole-word-masking-finetuned-squad"
//   tokenizer = "bert-large-uncased-whole-word-masking-finetuned-squad"
//
//   [hub]
//   offline   = true
//   cache_dir = "/data/checkpoints"
//
//   [decode]
//   inverted_span = "reject"

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::error::{QaError, QaResult};
use crate::domain::span::InvertedSpanPolicy;

/// SQuAD fine-tuned BERT-large used when nothing else is configured
pub const DEFAULT_CHECKPOINT: &str = "bert-large-uncased-whole-word-masking-finetuned-squad";

pub const DEFAULT_CONFIG_FILE: &str = "extractive-qa.toml";

const ENV_PREFIX: &str = "EXTRACTIVE_QA_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSection {
    /// Identifier of the span-extraction checkpoint
    pub name:      String,
    /// Identifier of the tokenizer, usually the same checkpoint
    pub tokenizer: String,
    /// Hub branch, tag or commit
    pub revision:  String,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            name:      DEFAULT_CHECKPOINT.to_string(),
            tokenizer: DEFAULT_CHECKPOINT.to_string(),
            revision:  "main".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubSection {
    pub endpoint:  String,
    /// Where downloaded checkpoints are kept; None means the
    /// platform cache directory
    pub cache_dir: Option<PathBuf>,
    /// Never touch the network
    pub offline:   bool,
}

impl Default for HubSection {
    fn default() -> Self {
        Self {
            endpoint:  "https://huggingface.co".to_string(),
            cache_dir: None,
            offline:   false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeSection {
    pub inverted_span: InvertedSpanPolicy,
    /// Cap on the encoded length; defaults to the model's position table
    pub max_seq_len:   Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model:  ModelSection,
    pub hub:    HubSection,
    pub decode: DecodeSection,
}

impl AppConfig {
    /// Merge defaults, the config file and the environment.
    ///
    /// An explicitly requested file must exist; the implicit
    /// `./extractive-qa.toml` is only read when present.
    pub fn load(config_path: Option<&Path>) -> QaResult<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match config_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(QaError::Configuration(format!(
                        "config file '{}' does not exist",
                        path.display()
                    )));
                }
                tracing::debug!("Reading config from '{}'", path.display());
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    tracing::debug!("Reading config from '{}'", implicit.display());
                    figment = figment.merge(Toml::file(implicit));
                }
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
            .extract()
            .map_err(|e| QaError::Configuration(e.to_string()))
    }

    /// Cache directory with the platform default filled in.
    pub fn cache_dir(&self) -> PathBuf {
        self.hub.cache_dir.clone().unwrap_or_else(default_cache_dir)
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("extractive-qa")
}
