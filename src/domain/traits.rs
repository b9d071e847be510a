// ============================================================
// Layer 3 — Core Traits (Capabilities)
// ============================================================
// The orchestrator only ever talks to these traits:
//
//   QaTokenizer     — encode (question, context), decode ids
//   SpanScorer      — one forward pass → start/end scores
//   ResourceLoader  — two-phase construct/load of a named handle
//   ContextSource   — where the passage comes from
//   QuestionAnswerer — what the interactive session drives
//
// The BERT/burn implementations live in ml/ and infra/;
// tests substitute small in-memory fakes.

use crate::domain::context::Context;
use crate::domain::encoding::{EncodedInput, SpanScores};
use crate::domain::error::QaResult;

// ─── QaTokenizer ──────────────────────────────────────────────────────────────
pub trait QaTokenizer {
    /// Join question and context with the model's boundary markers and
    /// map every sub-word unit to its id. Deterministic.
    fn encode(&self, question: &str, context: &str) -> QaResult<EncodedInput>;

    /// Map ids back to readable text, merging continuation pieces.
    fn decode(&self, ids: &[u32]) -> QaResult<String>;
}

// ─── SpanScorer ───────────────────────────────────────────────────────────────
pub trait SpanScorer {
    /// One deterministic forward pass. Must return one start and one
    /// end score per position of `input`.
    fn infer(&self, input: &EncodedInput) -> QaResult<SpanScores>;
}

// ─── ResourceLoader ───────────────────────────────────────────────────────────
/// A named pretrained resource loaded in two explicit phases:
/// construct with a name, then `load()`. `get()` stays `None`
/// until a load has succeeded.
pub trait ResourceLoader {
    type Handle;

    fn name(&self) -> &str;

    fn load(&mut self) -> QaResult<&Self::Handle>;

    fn get(&self) -> Option<&Self::Handle>;

    /// Give up the loader and keep the handle, if any.
    fn into_handle(self) -> Option<Self::Handle>;
}

// ─── ContextSource ────────────────────────────────────────────────────────────
pub trait ContextSource {
    fn load_context(&self) -> QaResult<Context>;
}

// ─── QuestionAnswerer ─────────────────────────────────────────────────────────
pub trait QuestionAnswerer {
    fn answer(&self, question: &str) -> QaResult<String>;
}
