// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: no tensor code, no printing,
// no direct file access.

// The encode → infer → decode pipeline over a fixed context
pub mod qa_system;

// Configuration → loaded model, tokenizer and context
pub mod setup_use_case;
