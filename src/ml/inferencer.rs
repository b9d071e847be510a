// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Runs one forward pass of a loaded BertQaModel and hands the
// raw start / end logits back as plain vectors. Implements the
// SpanScorer capability; span decoding happens in the domain.
use burn::prelude::*;

use crate::domain::encoding::{EncodedInput, SpanScores};
use crate::domain::error::{QaError, QaResult};
use crate::domain::traits::SpanScorer;
use crate::ml::model::BertQaModel;

#[cfg(feature = "wgpu")]
pub type InferBackend = burn::backend::Wgpu;

#[cfg(not(feature = "wgpu"))]
pub type InferBackend = burn::backend::NdArray;

pub struct Inferencer<B: Backend = InferBackend> {
    model:  BertQaModel<B>,
    device: B::Device,
}

impl<B: Backend> Inferencer<B> {
    pub fn new(model: BertQaModel<B>, device: B::Device) -> Self {
        Self { model, device }
    }

    /// Longest input the position table can score.
    pub fn max_positions(&self) -> usize {
        self.model.max_position_embeddings
    }

    fn to_tensor(&self, values: &[u32]) -> Tensor<B, 2, Int> {
        let data: Vec<i64> = values.iter().map(|&x| x as i64).collect();
        Tensor::<B, 2, Int>::from_data(TensorData::new(data, [1, values.len()]), &self.device)
    }
}

impl<B: Backend> SpanScorer for Inferencer<B> {
    fn infer(&self, input: &EncodedInput) -> QaResult<SpanScores> {
        let seq_len = input.len();
        if seq_len == 0 {
            return Err(QaError::Inference("empty input".to_string()));
        }
        if seq_len > self.max_positions() {
            return Err(QaError::SequenceTooLong { len: seq_len, max: self.max_positions() });
        }

        let output = self.model.forward(
            self.to_tensor(&input.ids),
            self.to_tensor(&input.type_ids),
            self.to_tensor(&input.attention_mask),
        );

        let scores = SpanScores::new(
            logits_to_vec(output.start_logits)?,
            logits_to_vec(output.end_logits)?,
        );
        scores.check_len(seq_len)?;
        tracing::debug!("Scored {} tokens", seq_len);
        Ok(scores)
    }
}

fn logits_to_vec<B: Backend>(logits: Tensor<B, 2>) -> QaResult<Vec<f32>> {
    logits
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|e| QaError::Inference(format!("cannot read logits: {e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::BertQaConfig;
    use burn::backend::NdArray;

    fn tiny_inferencer() -> Inferencer<NdArray> {
        let device = Default::default();
        let model = BertQaConfig::new(40, 8, 1, 2, 16)
            .with_max_position_embeddings(8)
            .init::<NdArray>(&device);
        Inferencer::new(model, device)
    }

    #[test]
    fn test_scores_cover_every_token() {
        let inferencer = tiny_inferencer();
        let input = EncodedInput::new(
            vec![1, 5, 2, 6, 7, 2],
            vec![0, 0, 0, 1, 1, 1],
            vec![1; 6],
        )
        .unwrap();
        let scores = inferencer.infer(&input).unwrap();
        assert_eq!(scores.start.len(), 6);
        assert_eq!(scores.end.len(), 6);
        assert!(scores.start.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_input_beyond_position_table_is_rejected() {
        let inferencer = tiny_inferencer();
        assert_eq!(inferencer.max_positions(), 8);
        let err = inferencer.infer(&EncodedInput::from_ids(vec![3; 9])).unwrap_err();
        assert!(matches!(err, QaError::SequenceTooLong { len: 9, max: 8 }));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let inferencer = tiny_inferencer();
        assert!(inferencer.infer(&EncodedInput::from_ids(vec![])).is_err());
    }
}
