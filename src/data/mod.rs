// ============================================================
// Layer 4 — Data Input
// ============================================================
// Where the passage comes from. There is a single step here:
//
//   --context-file / --context
//       │
//       ▼
//   ContextLoader  → Context (validated, immutable)

/// Loads the context from a file or a literal string
pub mod loader;
