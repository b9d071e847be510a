// ============================================================
// Layer 3 — Encoded Input and Span Scores
// ============================================================
// The two ephemeral values that flow through one question:
//
//   (question, context) ──tokenizer──► EncodedInput
//   EncodedInput        ──model─────► SpanScores
//
// Both are indexed by token position in the combined
// [CLS] question [SEP] context [SEP] sequence.

use serde::{Deserialize, Serialize};

use crate::domain::error::{QaError, QaResult};

/// Token ids, segment ids and attention mask for one
/// question+context pair. All three vectors have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedInput {
    pub ids:            Vec<u32>,
    /// 0 for the question segment, 1 for the context segment
    pub type_ids:       Vec<u32>,
    /// 1 = real token, 0 = padding
    pub attention_mask: Vec<u32>,
}

impl EncodedInput {
    /// Build an input with every position attended and in segment 0.
    pub fn from_ids(ids: Vec<u32>) -> Self {
        let len = ids.len();
        Self {
            ids,
            type_ids:       vec![0; len],
            attention_mask: vec![1; len],
        }
    }

    pub fn new(ids: Vec<u32>, type_ids: Vec<u32>, attention_mask: Vec<u32>) -> QaResult<Self> {
        if type_ids.len() != ids.len() || attention_mask.len() != ids.len() {
            return Err(QaError::Tokenization(format!(
                "misaligned encoding: {} ids, {} type ids, {} mask entries",
                ids.len(),
                type_ids.len(),
                attention_mask.len()
            )));
        }
        Ok(Self { ids, type_ids, attention_mask })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Per-token start and end logits produced by one forward pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanScores {
    pub start: Vec<f32>,
    pub end:   Vec<f32>,
}

impl SpanScores {
    pub fn new(start: Vec<f32>, end: Vec<f32>) -> Self {
        Self { start, end }
    }

    /// Check that there is exactly one start and one end score per token.
    pub fn check_len(&self, tokens: usize) -> QaResult<()> {
        for scores in [&self.start, &self.end] {
            if scores.len() != tokens {
                return Err(QaError::ScoreLengthMismatch { scores: scores.len(), tokens });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ids_attends_everything() {
        let enc = EncodedInput::from_ids(vec![101, 7, 102]);
        assert_eq!(enc.attention_mask, vec![1, 1, 1]);
        assert_eq!(enc.type_ids, vec![0, 0, 0]);
    }

    #[test]
    fn test_misaligned_encoding_is_rejected() {
        assert!(EncodedInput::new(vec![1, 2], vec![0], vec![1, 1]).is_err());
    }

    #[test]
    fn test_score_length_must_match_tokens() {
        let scores = SpanScores::new(vec![0.0; 3], vec![0.0; 2]);
        let err = scores.check_len(3).unwrap_err();
        assert!(matches!(err, QaError::ScoreLengthMismatch { scores: 2, tokens: 3 }));
        assert!(SpanScores::new(vec![0.0; 3], vec![0.0; 3]).check_len(3).is_ok());
    }
}
