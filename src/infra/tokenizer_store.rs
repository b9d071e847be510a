// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads a pretrained tokenizer.json (Hugging Face `tokenizers`
// format) and adapts it to the QaTokenizer capability.
//
// For BERT checkpoints the file carries everything needed:
// lower-casing normaliser, WordPiece vocabulary, and the
// post-processor that lays out a pair as
//
//   [CLS] question [SEP] context [SEP]
//     0      0       0      1      1     ← type ids
//
// Repositories that ship only a WordPiece `vocab.txt` get the
// same pipeline assembled in code, with lower-casing taken from
// `do_lower_case` in tokenizer_config.json (default: on).
//
// When a length cap is set only the context is truncated;
// a question that alone exceeds the cap is an encode error.

use serde::Deserialize;
use std::{fs, path::Path};
use tokenizers::{
    decoders::{wordpiece::WordPiece as WordPieceDecoder, DecoderWrapper},
    models::{wordpiece::WordPiece, ModelWrapper},
    normalizers::{bert::BertNormalizer, NormalizerWrapper},
    pre_tokenizers::{bert::BertPreTokenizer, PreTokenizerWrapper},
    processors::{bert::BertProcessing, PostProcessorWrapper},
    Tokenizer, TruncationDirection, TruncationParams, TruncationStrategy,
};

use crate::domain::encoding::EncodedInput;
use crate::domain::error::{QaError, QaResult};
use crate::domain::traits::{QaTokenizer, ResourceLoader};
use crate::infra::resource_store::ResourceStore;

pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const VOCAB_FILE: &str = "vocab.txt";
pub const TOKENIZER_CONFIG_FILE: &str = "tokenizer_config.json";

const UNK_TOKEN: &str = "[UNK]";
const CLS_TOKEN: &str = "[CLS]";
const SEP_TOKEN: &str = "[SEP]";

#[derive(Debug, Deserialize)]
struct TokenizerConfigJson {
    #[serde(default = "default_lowercase")]
    do_lower_case: bool,
}

fn default_lowercase() -> bool {
    true
}

/// A loaded pretrained tokenizer.
pub struct PretrainedTokenizer {
    inner: Tokenizer,
}

impl PretrainedTokenizer {
    pub fn from_file(path: &Path, max_len: Option<usize>) -> QaResult<Self> {
        let inner = Tokenizer::from_file(path).map_err(|e| load_error(path, e.to_string()))?;
        Self::with_inner(inner, path, max_len)
    }

    /// Assemble a BERT tokenizer around a WordPiece `vocab.txt`.
    pub fn from_vocab(path: &Path, lowercase: bool, max_len: Option<usize>) -> QaResult<Self> {
        let vocab = path
            .to_str()
            .ok_or_else(|| load_error(path, "path is not valid UTF-8".to_string()))?;
        let wordpiece = WordPiece::from_file(vocab)
            .unk_token(UNK_TOKEN.to_string())
            .build()
            .map_err(|e| load_error(path, e.to_string()))?;

        let mut inner = Tokenizer::new(ModelWrapper::WordPiece(wordpiece));
        let special = |token: &str| {
            inner
                .token_to_id(token)
                .map(|id| (token.to_string(), id))
                .ok_or_else(|| load_error(path, format!("vocabulary has no {token} token")))
        };
        let (sep, cls) = (special(SEP_TOKEN)?, special(CLS_TOKEN)?);

        inner
            .with_normalizer(NormalizerWrapper::BertNormalizer(BertNormalizer::new(
                true, true, None, lowercase,
            )))
            .with_pre_tokenizer(PreTokenizerWrapper::BertPreTokenizer(BertPreTokenizer))
            .with_post_processor(PostProcessorWrapper::Bert(BertProcessing::new(sep, cls)))
            .with_decoder(DecoderWrapper::WordPiece(WordPieceDecoder::default()));

        Self::with_inner(inner, path, max_len)
    }

    fn with_inner(mut inner: Tokenizer, path: &Path, max_len: Option<usize>) -> QaResult<Self> {
        if let Some(max_length) = max_len {
            inner
                .with_truncation(Some(TruncationParams {
                    max_length,
                    strategy:  TruncationStrategy::OnlySecond,
                    direction: TruncationDirection::Right,
                    stride:    0,
                }))
                .map_err(|e| load_error(path, format!("cannot truncate to {max_length} tokens: {e}")))?;
        }

        Ok(Self { inner })
    }

    pub fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(true)
    }
}

fn load_error(path: &Path, message: String) -> QaError {
    QaError::ResourceLoad { name: path.display().to_string(), message }
}

impl QaTokenizer for PretrainedTokenizer {
    fn encode(&self, question: &str, context: &str) -> QaResult<EncodedInput> {
        let encoding = self
            .inner
            .encode((question, context), true)
            .map_err(|e| QaError::Tokenization(e.to_string()))?;

        if !encoding.get_overflowing().is_empty() {
            tracing::warn!("Context truncated to {} tokens", encoding.len());
        }

        EncodedInput::new(
            encoding.get_ids().to_vec(),
            encoding.get_type_ids().to_vec(),
            encoding.get_attention_mask().to_vec(),
        )
    }

    fn decode(&self, ids: &[u32]) -> QaResult<String> {
        // special tokens are kept, only continuation pieces are merged
        self.inner
            .decode(ids, false)
            .map_err(|e| QaError::Tokenization(e.to_string()))
    }
}

/// Two-phase loader for a tokenizer identifier.
pub struct TokenizerLoader<'a> {
    name:      String,
    store:     &'a ResourceStore,
    max_len:   Option<usize>,
    tokenizer: Option<PretrainedTokenizer>,
}

impl<'a> TokenizerLoader<'a> {
    pub fn new(name: impl Into<String>, store: &'a ResourceStore) -> Self {
        Self { name: name.into(), store, max_len: None, tokenizer: None }
    }

    /// Truncate contexts so encodings never exceed `max_len` tokens.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// `do_lower_case` from tokenizer_config.json; absent file or key
    /// means lower-casing, as for uncased BERT.
    fn lowercase(&self) -> QaResult<bool> {
        let path = match self.store.resolve_file(&self.name, &[TOKENIZER_CONFIG_FILE]) {
            Ok(path) => path,
            Err(QaError::ResourceNotFound { .. }) => return Ok(default_lowercase()),
            Err(e) => return Err(e),
        };
        let json = fs::read_to_string(&path).map_err(|e| QaError::io(&path, e))?;
        let cfg: TokenizerConfigJson =
            serde_json::from_str(&json).map_err(|e| load_error(&path, e.to_string()))?;
        Ok(cfg.do_lower_case)
    }
}

impl ResourceLoader for TokenizerLoader<'_> {
    type Handle = PretrainedTokenizer;

    fn name(&self) -> &str {
        &self.name
    }

    fn load(&mut self) -> QaResult<&PretrainedTokenizer> {
        tracing::info!("Loading tokenizer '{}'", self.name);
        let path = self.store.resolve_file(&self.name, &[TOKENIZER_FILE, VOCAB_FILE])?;
        let tokenizer = if path.ends_with(VOCAB_FILE) {
            let lowercase = self.lowercase()?;
            tracing::info!("No {}; building from {} (lowercase={})", TOKENIZER_FILE, VOCAB_FILE, lowercase);
            PretrainedTokenizer::from_vocab(&path, lowercase, self.max_len)?
        } else {
            PretrainedTokenizer::from_file(&path, self.max_len)?
        };
        tracing::info!("Tokenizer '{}' ready ({} entries)", self.name, tokenizer.vocab_size());
        Ok(self.tokenizer.insert(tokenizer))
    }

    fn get(&self) -> Option<&PretrainedTokenizer> {
        self.tokenizer.as_ref()
    }

    fn into_handle(self) -> Option<PretrainedTokenizer> {
        self.tokenizer
    }
}
