// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All burn tensor code lives here:
//
//   model.rs      — BERT encoder + span-extraction head
//   inferencer.rs — forward pass behind the SpanScorer trait
//
// Weight import from pretrained checkpoints is in
// infra/checkpoint.rs.

/// BERT question-answering architecture
pub mod model;

/// Inference engine — turns an EncodedInput into span scores
pub mod inferencer;
