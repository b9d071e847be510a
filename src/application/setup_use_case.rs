// ============================================================
// Layer 2 — SetupUseCase
// ============================================================
// Turns configuration into a ready QaSystem, in this order:
//
//   Step 1: load and validate the context   (Layer 4 - data)
//   Step 2: open the resource store         (Layer 6 - infra)
//   Step 3: load the model                  (Layer 6 → Layer 5)
//   Step 4: load the tokenizer, capped at   (Layer 6 - infra)
//           the model's position table
//   Step 5: assemble the orchestrator       (Layer 2)
//
// A context problem therefore fails before anything is
// downloaded or read from a checkpoint.

use crate::application::qa_system::QaSystem;
use crate::data::loader::ContextLoader;
use crate::domain::error::{QaError, QaResult};
use crate::domain::traits::{ContextSource, ResourceLoader};
use crate::infra::{
    config::AppConfig,
    model_store::ModelLoader,
    resource_store::ResourceStore,
    tokenizer_store::{PretrainedTokenizer, TokenizerLoader},
};
use crate::ml::inferencer::{InferBackend, Inferencer};

pub type BertQaSystem = QaSystem<Inferencer<InferBackend>, PretrainedTokenizer>;

pub struct SetupUseCase {
    config:  AppConfig,
    context: ContextLoader,
}

impl SetupUseCase {
    pub fn new(config: AppConfig, context: ContextLoader) -> Self {
        Self { config, context }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn execute(&self) -> QaResult<BertQaSystem> {
        // Step 1
        let context = self.context.load_context()?;

        // Step 2
        let store = ResourceStore::from_config(&self.config)?;
        tracing::debug!("Checkpoint cache: {}", store.cache_dir().display());

        // Step 3
        let mut model_loader =
            ModelLoader::<InferBackend>::new(&self.config.model.name, &store, Default::default());
        let max_positions = model_loader.load()?.max_positions();

        // Step 4
        let max_len = self
            .config
            .decode
            .max_seq_len
            .map_or(max_positions, |n| n.min(max_positions));
        let mut tokenizer_loader =
            TokenizerLoader::new(&self.config.model.tokenizer, &store).with_max_len(max_len);
        tokenizer_loader.load()?;
        let tokenizer = tokenizer_loader.into_handle().ok_or_else(|| {
            QaError::InvalidConfiguration(format!(
                "tokenizer '{}' was not loaded",
                self.config.model.tokenizer
            ))
        })?;

        // Step 5
        let system = QaSystem::new(model_loader.into_handle(), tokenizer, context)?
            .with_policy(self.config.decode.inverted_span);
        tracing::info!("QA system ready (max {} tokens per question)", max_len);
        Ok(system)
    }
}
