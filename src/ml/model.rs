// ============================================================
// Layer 5 — BERT Span-Extraction Model (Burn)
// ============================================================
// The encoder of a pretrained BERT checkpoint plus its
// `qa_outputs` head:
//
//   ids, type_ids ─► word + position + token-type embeddings
//                    └► LayerNorm
//                 ─► N × [ self-attention ─► add & LayerNorm
//                          feed-forward   ─► add & LayerNorm ]
//                 ─► Linear(hidden → 2) ─► start / end logits
//
// Field names follow the Hugging Face parameter layout so the
// checkpoint loader only has to apply a handful of renames
// (see infra/checkpoint.rs). Inference only: no dropout.

use burn::{
    nn::{Embedding, EmbeddingConfig, LayerNorm, LayerNormConfig, Linear, LinearConfig},
    prelude::*,
    tensor::activation::{gelu, softmax},
};

use crate::domain::error::{QaError, QaResult};

/// Added to attention scores of padded positions
const MASKED_SCORE: f32 = -10_000.0;

// Architecture hyper-parameters. Checkpoints describe them in
// config.json (see infra/checkpoint.rs for the file format).
#[derive(Config, Debug)]
pub struct BertQaConfig {
    pub vocab_size:          usize,
    pub hidden_size:         usize,
    pub num_hidden_layers:   usize,
    pub num_attention_heads: usize,
    pub intermediate_size:   usize,
    #[config(default = 512)]
    pub max_position_embeddings: usize,
    #[config(default = 2)]
    pub type_vocab_size: usize,
    #[config(default = 1e-12)]
    pub layer_norm_eps: f64,
}

impl BertQaConfig {
    /// Hidden size must split evenly across attention heads.
    pub fn validate(&self) -> QaResult<()> {
        if self.num_attention_heads == 0 || self.hidden_size % self.num_attention_heads != 0 {
            return Err(QaError::InvalidConfiguration(format!(
                "hidden_size {} is not divisible by num_attention_heads {}",
                self.hidden_size, self.num_attention_heads
            )));
        }
        if self.vocab_size == 0 || self.max_position_embeddings == 0 || self.type_vocab_size == 0 {
            return Err(QaError::InvalidConfiguration(
                "vocab_size, max_position_embeddings and type_vocab_size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> BertQaModel<B> {
        let embeddings = BertEmbeddings {
            word_embeddings:       EmbeddingConfig::new(self.vocab_size, self.hidden_size).init(device),
            position_embeddings:   EmbeddingConfig::new(self.max_position_embeddings, self.hidden_size)
                .init(device),
            token_type_embeddings: EmbeddingConfig::new(self.type_vocab_size, self.hidden_size).init(device),
            layer_norm:            self.layer_norm(device),
        };
        let layers = (0..self.num_hidden_layers)
            .map(|_| self.build_layer(device))
            .collect();
        BertQaModel {
            embeddings,
            encoder:    BertEncoder { layers },
            qa_outputs: LinearConfig::new(self.hidden_size, 2).init(device),
            max_position_embeddings: self.max_position_embeddings,
        }
    }

    fn layer_norm<B: Backend>(&self, device: &B::Device) -> LayerNorm<B> {
        LayerNormConfig::new(self.hidden_size)
            .with_epsilon(self.layer_norm_eps)
            .init(device)
    }

    fn build_layer<B: Backend>(&self, device: &B::Device) -> BertLayer<B> {
        let hidden = self.hidden_size;
        BertLayer {
            attention: BertAttention {
                self_attn: BertSelfAttention {
                    query:     LinearConfig::new(hidden, hidden).init(device),
                    key:       LinearConfig::new(hidden, hidden).init(device),
                    value:     LinearConfig::new(hidden, hidden).init(device),
                    num_heads: self.num_attention_heads,
                },
                output: BertAddNorm {
                    dense:      LinearConfig::new(hidden, hidden).init(device),
                    layer_norm: self.layer_norm(device),
                },
            },
            intermediate: BertIntermediate {
                dense: LinearConfig::new(hidden, self.intermediate_size).init(device),
            },
            output: BertAddNorm {
                dense:      LinearConfig::new(self.intermediate_size, hidden).init(device),
                layer_norm: self.layer_norm(device),
            },
        }
    }
}

#[derive(Module, Debug)]
pub struct BertEmbeddings<B: Backend> {
    pub word_embeddings:       Embedding<B>,
    pub position_embeddings:   Embedding<B>,
    pub token_type_embeddings: Embedding<B>,
    pub layer_norm:            LayerNorm<B>,
}

impl<B: Backend> BertEmbeddings<B> {
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>, type_ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let [batch_size, seq_len] = input_ids.dims();

        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &input_ids.device())
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);

        let x = self.word_embeddings.forward(input_ids)
            + self.position_embeddings.forward(positions)
            + self.token_type_embeddings.forward(type_ids);
        self.layer_norm.forward(x)
    }
}

#[derive(Module, Debug)]
pub struct BertSelfAttention<B: Backend> {
    pub query:     Linear<B>,
    pub key:       Linear<B>,
    pub value:     Linear<B>,
    pub num_heads: usize,
}

impl<B: Backend> BertSelfAttention<B> {
    /// x: [batch, seq, hidden], mask: [batch, 1, 1, seq] additive
    pub fn forward(&self, x: Tensor<B, 3>, mask: Tensor<B, 4>) -> Tensor<B, 3> {
        let [batch_size, seq_len, hidden] = x.dims();
        let head_dim = hidden / self.num_heads;

        // [batch, seq, hidden] → [batch, heads, seq, head_dim]
        let split_heads = |t: Tensor<B, 3>| {
            t.reshape([batch_size, seq_len, self.num_heads, head_dim])
                .swap_dims(1, 2)
        };
        let q = split_heads(self.query.forward(x.clone()));
        let k = split_heads(self.key.forward(x.clone()));
        let v = split_heads(self.value.forward(x));

        let scores = q.matmul(k.transpose()).div_scalar((head_dim as f64).sqrt())
            + mask.expand([batch_size, self.num_heads, seq_len, seq_len]);
        let probs = softmax(scores, 3);

        probs
            .matmul(v)
            .swap_dims(1, 2)
            .reshape([batch_size, seq_len, hidden])
    }
}

/// Dense projection followed by residual add and LayerNorm.
/// Used after attention and after the feed-forward block.
#[derive(Module, Debug)]
pub struct BertAddNorm<B: Backend> {
    pub dense:      Linear<B>,
    pub layer_norm: LayerNorm<B>,
}

impl<B: Backend> BertAddNorm<B> {
    pub fn forward(&self, x: Tensor<B, 3>, residual: Tensor<B, 3>) -> Tensor<B, 3> {
        self.layer_norm.forward(self.dense.forward(x) + residual)
    }
}

#[derive(Module, Debug)]
pub struct BertAttention<B: Backend> {
    pub self_attn: BertSelfAttention<B>,
    pub output:    BertAddNorm<B>,
}

impl<B: Backend> BertAttention<B> {
    pub fn forward(&self, x: Tensor<B, 3>, mask: Tensor<B, 4>) -> Tensor<B, 3> {
        let context = self.self_attn.forward(x.clone(), mask);
        self.output.forward(context, x)
    }
}

#[derive(Module, Debug)]
pub struct BertIntermediate<B: Backend> {
    pub dense: Linear<B>,
}

#[derive(Module, Debug)]
pub struct BertLayer<B: Backend> {
    pub attention:    BertAttention<B>,
    pub intermediate: BertIntermediate<B>,
    pub output:       BertAddNorm<B>,
}

impl<B: Backend> BertLayer<B> {
    pub fn forward(&self, x: Tensor<B, 3>, mask: Tensor<B, 4>) -> Tensor<B, 3> {
        let attended = self.attention.forward(x, mask);
        let hidden = gelu(self.intermediate.dense.forward(attended.clone()));
        self.output.forward(hidden, attended)
    }
}

#[derive(Module, Debug)]
pub struct BertEncoder<B: Backend> {
    pub layers: Vec<BertLayer<B>>,
}

#[derive(Module, Debug)]
pub struct BertQaModel<B: Backend> {
    pub embeddings: BertEmbeddings<B>,
    pub encoder:    BertEncoder<B>,
    pub qa_outputs: Linear<B>,
    pub max_position_embeddings: usize,
}

pub struct QaModelOutput<B: Backend> {
    pub start_logits: Tensor<B, 2>,
    pub end_logits:   Tensor<B, 2>,
}

impl<B: Backend> BertQaModel<B> {
    /// All inputs: [batch, seq_len] → start_logits, end_logits: [batch, seq_len]
    pub fn forward(
        &self,
        input_ids:      Tensor<B, 2, Int>,
        type_ids:       Tensor<B, 2, Int>,
        attention_mask: Tensor<B, 2, Int>,
    ) -> QaModelOutput<B> {
        let [batch_size, seq_len] = input_ids.dims();

        // 1 → 0.0 (attend), 0 → MASKED_SCORE (ignore)
        let mask = attention_mask
            .float()
            .neg()
            .add_scalar(1.0)
            .mul_scalar(MASKED_SCORE)
            .reshape([batch_size, 1, 1, seq_len]);

        let mut x = self.embeddings.forward(input_ids, type_ids);
        for layer in &self.encoder.layers {
            x = layer.forward(x, mask.clone());
        }

        // Project to 2 logits per token then split into start / end.
        let logits = self.qa_outputs.forward(x); // [batch, seq_len, 2]
        let start_logits = logits.clone()
            .slice([0..batch_size, 0..seq_len, 0..1])
            .reshape([batch_size, seq_len]);
        let end_logits = logits
            .slice([0..batch_size, 0..seq_len, 1..2])
            .reshape([batch_size, seq_len]);

        QaModelOutput { start_logits, end_logits }
    }
}
