// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure the library can surface, as one enum.
// The CLI wraps these in anyhow with extra context; nothing
// below the CLI recovers from them.

use std::path::PathBuf;
use thiserror::Error;

pub type QaResult<T> = Result<T, QaError>;

#[derive(Debug, Error)]
pub enum QaError {
    /// Missing or contradictory user input (no context source, empty
    /// context, unreadable config file).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A component was wired together without a required collaborator.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A model or tokenizer identifier did not resolve to files.
    #[error("resource not found: '{name}' (looked for {tried})")]
    ResourceNotFound { name: String, tried: String },

    /// The files were found but could not be turned into a handle.
    #[error("cannot load '{name}': {message}")]
    ResourceLoad { name: String, message: String },

    #[error("cannot read '{path}': {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tokenization failed: {0}")]
    Tokenization(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("model returned {scores} scores for {tokens} input tokens")]
    ScoreLengthMismatch { scores: usize, tokens: usize },

    #[error("input has {len} tokens but the model accepts at most {max}")]
    SequenceTooLong { len: usize, max: usize },

    /// The end-score argmax precedes the start-score argmax and the
    /// decoder is configured to refuse such spans.
    #[error("no answer: end position {end} does not follow start position {start}")]
    InvertedSpan { start: usize, end: usize },

    #[error("hub request for '{url}' failed: {message}")]
    Hub { url: String, message: String },
}

impl QaError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// True for the configuration family (including an orchestrator
    /// built without a model).
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::InvalidConfiguration(_))
    }
}
