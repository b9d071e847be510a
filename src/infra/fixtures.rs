// Tiny on-disk checkpoints for tests: a one-layer BERT in
// Hugging Face layout plus a matching 16-entry tokenizer.

use safetensors::{tensor::TensorView, Dtype};
use std::{collections::HashMap, fs, path::{Path, PathBuf}};

// A minimal BERT-style tokenizer: lower-casing, whitespace/punctuation
// splitting, WordPiece with '##' continuations and the usual
// [CLS] A [SEP] B [SEP] template.
pub const TINY_TOKENIZER: &str = r###"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [
    {"id": 0, "content": "[PAD]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
    {"id": 1, "content": "[UNK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
    {"id": 2, "content": "[CLS]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
    {"id": 3, "content": "[SEP]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
  ],
  "normalizer": {"type": "BertNormalizer", "clean_text": true, "handle_chinese_chars": true, "strip_accents": null, "lowercase": true},
  "pre_tokenizer": {"type": "BertPreTokenizer"},
  "post_processor": {
    "type": "TemplateProcessing",
    "single": [{"SpecialToken": {"id": "[CLS]", "type_id": 0}}, {"Sequence": {"id": "A", "type_id": 0}}, {"SpecialToken": {"id": "[SEP]", "type_id": 0}}],
    "pair": [{"SpecialToken": {"id": "[CLS]", "type_id": 0}}, {"Sequence": {"id": "A", "type_id": 0}}, {"SpecialToken": {"id": "[SEP]", "type_id": 0}}, {"Sequence": {"id": "B", "type_id": 1}}, {"SpecialToken": {"id": "[SEP]", "type_id": 1}}],
    "special_tokens": {
      "[CLS]": {"id": "[CLS]", "ids": [2], "tokens": ["[CLS]"]},
      "[SEP]": {"id": "[SEP]", "ids": [3], "tokens": ["[SEP]"]}
    }
  },
  "decoder": {"type": "WordPiece", "prefix": "##", "cleanup": true},
  "model": {
    "type": "WordPiece",
    "unk_token": "[UNK]",
    "continuing_subword_prefix": "##",
    "max_input_chars_per_word": 100,
    "vocab": {
      "[PAD]": 0, "[UNK]": 1, "[CLS]": 2, "[SEP]": 3,
      "where": 4, "is": 5, "the": 6, "tower": 7, "?": 8,
      "it": 9, "stands": 10, "in": 11, "paris": 12, ".": 13,
      "eif": 14, "##fel": 15
    }
  }
}"###;

/// The same vocabulary as TINY_TOKENIZER, one token per line.
pub const TINY_VOCAB: &str = "[PAD]\n[UNK]\n[CLS]\n[SEP]\nwhere\nis\nthe\ntower\n?\nit\nstands\nin\nparis\n.\neif\n##fel\n";

// layer_norm_eps and type_vocab_size are left out, as in many
// published checkpoints.
pub const TINY_CONFIG: &str = r#"{
  "architectures": ["BertForQuestionAnswering"],
  "model_type": "bert",
  "hidden_act": "gelu",
  "vocab_size": 16,
  "hidden_size": 4,
  "num_hidden_layers": 1,
  "num_attention_heads": 2,
  "intermediate_size": 8,
  "max_position_embeddings": 16
}"#;

pub const TINY_HIDDEN: usize = 4;
const TINY_INTERMEDIATE: usize = 8;

/// `qa_outputs.weight` as stored, shape [2, hidden].
pub const QA_OUTPUTS_WEIGHT: [f32; 8] = [1.0, 2.0, 3.0, 4.0, 10.0, 20.0, 30.0, 40.0];
pub const EMBEDDINGS_GAMMA: f32 = 2.0;
pub const ATTENTION_GAMMA: f32 = 3.0;

pub fn write_tokenizer(dir: &Path) -> PathBuf {
    let path = dir.join("tokenizer.json");
    fs::write(&path, TINY_TOKENIZER).unwrap();
    path
}

/// Small, varied values so no two rows are identical.
fn filled(len: usize, seed: usize) -> Vec<f32> {
    (0..len).map(|i| ((i * 7 + seed) % 11) as f32 / 10.0 - 0.5).collect()
}

/// Writes config.json and model.safetensors with Hugging Face
/// parameter names, both LayerNorm spellings and an unused pooler.
pub fn write_checkpoint(dir: &Path) {
    let h = TINY_HIDDEN;
    let ff = TINY_INTERMEDIATE;
    let layer = "bert.encoder.layer.0";

    let mut tensors: Vec<(String, Vec<usize>, Vec<f32>)> = vec![
        ("bert.embeddings.word_embeddings.weight".into(), vec![16, h], filled(16 * h, 1)),
        ("bert.embeddings.position_embeddings.weight".into(), vec![16, h], filled(16 * h, 2)),
        ("bert.embeddings.token_type_embeddings.weight".into(), vec![2, h], filled(2 * h, 3)),
        ("bert.embeddings.LayerNorm.gamma".into(), vec![h], vec![EMBEDDINGS_GAMMA; h]),
        ("bert.embeddings.LayerNorm.beta".into(), vec![h], vec![0.0; h]),
        (format!("{layer}.attention.output.dense.weight"), vec![h, h], filled(h * h, 7)),
        (format!("{layer}.attention.output.dense.bias"), vec![h], filled(h, 8)),
        (format!("{layer}.attention.output.LayerNorm.gamma"), vec![h], vec![ATTENTION_GAMMA; h]),
        (format!("{layer}.attention.output.LayerNorm.beta"), vec![h], vec![0.1; h]),
        (format!("{layer}.intermediate.dense.weight"), vec![ff, h], filled(ff * h, 9)),
        (format!("{layer}.intermediate.dense.bias"), vec![ff], filled(ff, 10)),
        (format!("{layer}.output.dense.weight"), vec![h, ff], filled(h * ff, 11)),
        (format!("{layer}.output.dense.bias"), vec![h], filled(h, 12)),
        (format!("{layer}.output.LayerNorm.weight"), vec![h], vec![1.0; h]),
        (format!("{layer}.output.LayerNorm.bias"), vec![h], vec![0.0; h]),
        ("bert.pooler.dense.weight".into(), vec![h, h], filled(h * h, 13)),
        ("bert.pooler.dense.bias".into(), vec![h], filled(h, 14)),
        ("qa_outputs.weight".into(), vec![2, h], QA_OUTPUTS_WEIGHT.to_vec()),
        ("qa_outputs.bias".into(), vec![2], vec![0.0, 0.5]),
    ];
    for (i, proj) in ["query", "key", "value"].iter().enumerate() {
        tensors.push((format!("{layer}.attention.self.{proj}.weight"), vec![h, h], filled(h * h, 4 + i)));
        tensors.push((format!("{layer}.attention.self.{proj}.bias"), vec![h], filled(h, 4 + i)));
    }

    let bytes: Vec<(String, Vec<usize>, Vec<u8>)> = tensors
        .into_iter()
        .map(|(name, shape, values)| {
            let raw = values.iter().flat_map(|v| v.to_le_bytes()).collect();
            (name, shape, raw)
        })
        .collect();
    let views: HashMap<String, TensorView<'_>> = bytes
        .iter()
        .map(|(name, shape, raw)| {
            (name.clone(), TensorView::new(Dtype::F32, shape.clone(), raw).unwrap())
        })
        .collect();
    let serialized = safetensors::serialize(&views, &None::<HashMap<String, String>>).unwrap();

    fs::write(dir.join("config.json"), TINY_CONFIG).unwrap();
    fs::write(dir.join("model.safetensors"), serialized).unwrap();
}
