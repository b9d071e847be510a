// ============================================================
// Layer 6 — Checkpoint Loader
// ============================================================
// Restores a pretrained BertQaModel from Hugging Face files:
//
//   config.json         — architecture (BertQaConfig)
//   model.safetensors   — weights (preferred)
//   pytorch_model.bin   — weights (fallback)
//
// Hugging Face parameter names are renamed onto the module
// tree before loading, e.g.
//
//   bert.encoder.layer.3.attention.self.query.weight
//     → encoder.layers.3.attention.self_attn.query.weight
//   bert.embeddings.LayerNorm.gamma
//     → embeddings.layer_norm.weight
//
// The PyTorch adapter transposes Linear weights and maps
// LayerNorm weight/bias onto gamma/beta. Tensors the model
// has no slot for (pooler, position_ids) are ignored.

use burn::{
    prelude::*,
    record::{FullPrecisionSettings, Recorder},
};
use burn_import::{
    pytorch::{LoadArgs as PyTorchLoadArgs, PyTorchFileRecorder},
    safetensors::{AdapterType, LoadArgs as SafetensorsLoadArgs, SafetensorsFileRecorder},
};
use serde::Deserialize;
use std::{fs, path::{Path, PathBuf}};

use crate::domain::error::{QaError, QaResult};
use crate::ml::model::{BertQaConfig, BertQaModel, BertQaModelRecord};

/// Applied in order to every parameter name in the file
const KEY_REMAP: [(&str, &str); 6] = [
    (r"^bert\.", ""),
    (r"\.gamma$", ".weight"),
    (r"\.beta$", ".bias"),
    (r"LayerNorm", "layer_norm"),
    (r"attention\.self\.", "attention.self_attn."),
    (r"encoder\.layer\.([0-9]+)\.", "encoder.layers.$1."),
];

// config.json as Hugging Face writes it. Keys Hugging Face treats
// as optional fall back to its BertConfig defaults; unknown keys
// are ignored.
#[derive(Debug, Deserialize)]
struct HfBertConfig {
    vocab_size:          usize,
    hidden_size:         usize,
    num_hidden_layers:   usize,
    num_attention_heads: usize,
    intermediate_size:   usize,
    #[serde(default = "default_max_position_embeddings")]
    max_position_embeddings: usize,
    #[serde(default = "default_type_vocab_size")]
    type_vocab_size: usize,
    #[serde(default = "default_layer_norm_eps")]
    layer_norm_eps: f64,
    #[serde(default)]
    hidden_act: Option<String>,
}

fn default_max_position_embeddings() -> usize { 512 }
fn default_type_vocab_size() -> usize { 2 }
fn default_layer_norm_eps() -> f64 { 1e-12 }

impl From<HfBertConfig> for BertQaConfig {
    fn from(hf: HfBertConfig) -> Self {
        BertQaConfig::new(
            hf.vocab_size,
            hf.hidden_size,
            hf.num_hidden_layers,
            hf.num_attention_heads,
            hf.intermediate_size,
        )
        .with_max_position_embeddings(hf.max_position_embeddings)
        .with_type_vocab_size(hf.type_vocab_size)
        .with_layer_norm_eps(hf.layer_norm_eps)
    }
}

/// Parse the text of a config.json.
pub fn parse_config(json: &str) -> QaResult<BertQaConfig> {
    let hf: HfBertConfig = serde_json::from_str(json)
        .map_err(|e| QaError::InvalidConfiguration(e.to_string()))?;
    if let Some(act) = hf.hidden_act.as_deref().filter(|a| *a != "gelu") {
        tracing::warn!("Checkpoint uses hidden_act '{}'; the encoder always applies gelu", act);
    }
    let cfg = BertQaConfig::from(hf);
    cfg.validate()?;
    Ok(cfg)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightsFormat {
    Safetensors,
    PyTorch,
}

impl WeightsFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("safetensors") => Self::Safetensors,
            _ => Self::PyTorch,
        }
    }
}

/// Paths of one checkpoint's architecture and weight files.
pub struct CheckpointLoader {
    /// Identifier the files were resolved from, for error messages
    name:         String,
    config_path:  PathBuf,
    weights_path: PathBuf,
}

impl CheckpointLoader {
    pub fn new(name: impl Into<String>, config_path: PathBuf, weights_path: PathBuf) -> Self {
        Self { name: name.into(), config_path, weights_path }
    }

    /// Read config.json into the architecture description.
    pub fn load_config(&self) -> QaResult<BertQaConfig> {
        let json = fs::read_to_string(&self.config_path)
            .map_err(|e| QaError::io(&self.config_path, e))?;
        parse_config(&json).map_err(|e| {
            self.load_error(format!("bad config '{}': {e}", self.config_path.display()))
        })
    }

    /// Build the architecture from config.json and fill it with the
    /// checkpoint's weights.
    pub fn load_model<B: Backend>(&self, device: &B::Device) -> QaResult<BertQaModel<B>> {
        let cfg = self.load_config()?;
        tracing::info!(
            "Building BERT: {} layers, hidden={}, heads={}, max_positions={}",
            cfg.num_hidden_layers,
            cfg.hidden_size,
            cfg.num_attention_heads,
            cfg.max_position_embeddings
        );
        let model: BertQaModel<B> = cfg.init(device);

        let format = WeightsFormat::from_path(&self.weights_path);
        tracing::info!("Loading {:?} weights from '{}'", format, self.weights_path.display());

        let record: BertQaModelRecord<B> = match format {
            WeightsFormat::Safetensors => {
                let args = KEY_REMAP.iter().fold(
                    SafetensorsLoadArgs::new(self.weights_path.clone())
                        .with_adapter_type(AdapterType::PyTorch),
                    |args, (pattern, replacement)| args.with_key_remap(pattern, replacement),
                );
                SafetensorsFileRecorder::<FullPrecisionSettings>::default().load(args, device)
            }
            WeightsFormat::PyTorch => {
                let args = KEY_REMAP.iter().fold(
                    PyTorchLoadArgs::new(self.weights_path.clone()),
                    |args, (pattern, replacement)| args.with_key_remap(pattern, replacement),
                );
                PyTorchFileRecorder::<FullPrecisionSettings>::default().load(args, device)
            }
        }
        .map_err(|e| {
            self.load_error(format!("cannot read weights '{}': {e:?}", self.weights_path.display()))
        })?;

        Ok(model.load_record(record))
    }

    fn load_error(&self, message: String) -> QaError {
        QaError::ResourceLoad { name: self.name.clone(), message }
    }
}
