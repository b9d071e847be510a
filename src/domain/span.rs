// ============================================================
// Layer 3 — Answer Span Decoding
// ============================================================
// Extractive QA models emit two independent distributions
// over token positions: "the answer starts here" and "the
// answer ends here". The decoder takes the argmax of each:
//
//   start = argmax(start_scores)
//   end   = argmax(end_scores) + 1      (end-exclusive)
//
// and the answer is ids[start..end]. When the end argmax lands
// before the start argmax the span is inverted; what happens
// then is decided by InvertedSpanPolicy.

use serde::{Deserialize, Serialize};

use crate::domain::encoding::SpanScores;
use crate::domain::error::{QaError, QaResult};

/// Half-open token range `[start, end)` into the encoded input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSpan {
    pub start: usize,
    pub end:   usize,
}

impl AnswerSpan {
    pub fn is_inverted(&self) -> bool {
        self.end <= self.start
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What to do when `end <= start`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvertedSpanPolicy {
    /// Answer with the empty string.
    #[default]
    Empty,
    /// Fail with `QaError::InvertedSpan`.
    Reject,
}

/// Position of the largest value; ties go to the lowest index.
/// NaN compares above every number, so the first NaN wins, the
/// same as torch's `argmax`. Returns `None` for an empty slice.
pub fn argmax(values: &[f32]) -> Option<usize> {
    if let Some(i) = values.iter().position(|v| v.is_nan()) {
        return Some(i);
    }
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Pick the raw argmax span without any validity check.
pub fn locate_span(scores: &SpanScores) -> QaResult<AnswerSpan> {
    let start = argmax(&scores.start)
        .ok_or_else(|| QaError::Inference("model returned no start scores".to_string()))?;
    let end = argmax(&scores.end)
        .ok_or_else(|| QaError::Inference("model returned no end scores".to_string()))?
        + 1;
    Ok(AnswerSpan { start, end })
}

impl InvertedSpanPolicy {
    /// Apply the policy: `Ok(None)` means "no answer".
    pub fn resolve(self, span: AnswerSpan) -> QaResult<Option<AnswerSpan>> {
        if !span.is_inverted() {
            return Ok(Some(span));
        }
        tracing::debug!("Inverted span [{},{}) under {:?} policy", span.start, span.end, self);
        match self {
            Self::Empty  => Ok(None),
            Self::Reject => Err(QaError::InvertedSpan { start: span.start, end: span.end }),
        }
    }
}
