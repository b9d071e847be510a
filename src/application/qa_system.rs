// ============================================================
// Layer 2 — QA Orchestrator
// ============================================================
// Wires a span scorer and a tokenizer to one fixed context and
// answers questions about it:
//
//   Step 1: encode (question, context)       (tokenizer)
//   Step 2: one forward pass → start/end     (model)
//   Step 3: start = argmax(start scores)     (domain::span)
//   Step 4: end   = argmax(end scores) + 1   (domain::span)
//   Step 5: decode ids[start..end]           (tokenizer)
//   Step 6: trim whitespace
//
// The slice in step 5 is taken from the question+context
// encoding, so a badly behaved model can "answer" with part
// of the question or a separator token.

use crate::domain::context::Context;
use crate::domain::error::{QaError, QaResult};
use crate::domain::span::{locate_span, AnswerSpan, InvertedSpanPolicy};
use crate::domain::traits::{QaTokenizer, QuestionAnswerer, SpanScorer};

/// The answer text together with how it was chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub text:        String,
    /// None when the span was inverted and the policy chose "no answer"
    pub span:        Option<AnswerSpan>,
    pub start_score: f32,
    pub end_score:   f32,
}

pub struct QaSystem<M, T> {
    model:     M,
    tokenizer: T,
    context:   Context,
    policy:    InvertedSpanPolicy,
}

impl<M: SpanScorer, T: QaTokenizer> QaSystem<M, T> {
    /// Fails with `InvalidConfiguration` when no model is supplied.
    pub fn new(model: Option<M>, tokenizer: T, context: Context) -> QaResult<Self> {
        let model = model.ok_or_else(|| {
            QaError::InvalidConfiguration("a QA system needs a loaded model".to_string())
        })?;
        Ok(Self { model, tokenizer, context, policy: InvertedSpanPolicy::default() })
    }

    pub fn with_policy(mut self, policy: InvertedSpanPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn policy(&self) -> InvertedSpanPolicy {
        self.policy
    }

    pub fn answer_detailed(&self, question: &str) -> QaResult<Answer> {
        let input = self.tokenizer.encode(question, self.context.as_str())?;
        let scores = self.model.infer(&input)?;
        scores.check_len(input.len())?;

        let raw = locate_span(&scores)?;
        let start_score = scores.start[raw.start];
        let end_score = scores.end[raw.end - 1];

        let span = self.policy.resolve(raw)?;
        let text = match span {
            Some(span) => self.tokenizer.decode(&input.ids[span.start..span.end])?,
            None => String::new(),
        };
        let text = text.trim().to_string();

        tracing::debug!(
            "Span [{},{}) start={:.3} end={:.3} answer='{}'",
            raw.start, raw.end, start_score, end_score, text
        );

        Ok(Answer { text, span, start_score, end_score })
    }
}

impl<M: SpanScorer, T: QaTokenizer> QuestionAnswerer for QaSystem<M, T> {
    fn answer(&self, question: &str) -> QaResult<String> {
        Ok(self.answer_detailed(question)?.text)
    }
}
