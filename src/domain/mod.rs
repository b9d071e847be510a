// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits: no burn, no tokenizers, no I/O.
// Everything the orchestrator needs to reason about a question
// is defined here.

/// The fixed passage answers are extracted from
pub mod context;

/// Token ids / masks in, start / end scores out
pub mod encoding;

/// Argmax span decoding and the inverted-span policy
pub mod span;

/// Library error type
pub mod error;

/// Capability traits implemented by the ML and infra layers
pub mod traits;
