// ============================================================
// extractive-qa — library root
// ============================================================
// Layer 1  cli          — flags, interactive session
// Layer 2  application  — setup and the answering pipeline
// Layer 3  domain       — types, traits, errors, span rules
// Layer 4  data         — context sources
// Layer 5  ml           — BERT encoder + span head (burn)
// Layer 6  infra        — config, hub cache, checkpoint import

#![recursion_limit = "256"]

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
pub mod ml;
