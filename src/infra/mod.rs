// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
//   config.rs          — layered settings (defaults, TOML, env)
//   resource_store.rs  — identifier → files (local dir, cache, hub)
//   hub.rs             — HTTP downloads into the cache
//   checkpoint.rs      — config.json + weights → BertQaModel
//   model_store.rs     — two-phase model loader
//   tokenizer_store.rs — two-phase tokenizer loader and adapter
//   fixtures.rs        — tiny checkpoints for tests

/// Layered application configuration
pub mod config;

/// Resolving model / tokenizer identifiers to files
pub mod resource_store;

/// Hugging Face hub downloads
pub mod hub;

/// Pretrained weight import
pub mod checkpoint;

/// Model loading behind ResourceLoader
pub mod model_store;

/// Tokenizer loading behind ResourceLoader
pub mod tokenizer_store;

#[cfg(test)]
pub(crate) mod fixtures;
