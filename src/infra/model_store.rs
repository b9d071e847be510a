// ============================================================
// Layer 6 — Model Loader
// ============================================================
// Two-phase loading of a span-extraction model:
//
//   let mut loader = ModelLoader::new(name, &store, device);
//   loader.get()    // None
//   loader.load()?  // resolve files → build → read weights
//   loader.get()    // Some(&Inferencer)

use burn::prelude::*;

use crate::domain::error::QaResult;
use crate::domain::traits::ResourceLoader;
use crate::infra::checkpoint::CheckpointLoader;
use crate::infra::resource_store::ResourceStore;
use crate::ml::inferencer::{InferBackend, Inferencer};

pub const CONFIG_FILE: &str = "config.json";

/// Preferred first
pub const WEIGHT_FILES: [&str; 2] = ["model.safetensors", "pytorch_model.bin"];

pub struct ModelLoader<'a, B: Backend = InferBackend> {
    name:   String,
    store:  &'a ResourceStore,
    device: B::Device,
    model:  Option<Inferencer<B>>,
}

impl<'a, B: Backend> ModelLoader<'a, B> {
    pub fn new(name: impl Into<String>, store: &'a ResourceStore, device: B::Device) -> Self {
        Self { name: name.into(), store, device, model: None }
    }
}

impl<B: Backend> ResourceLoader for ModelLoader<'_, B> {
    type Handle = Inferencer<B>;

    fn name(&self) -> &str {
        &self.name
    }

    fn load(&mut self) -> QaResult<&Inferencer<B>> {
        tracing::info!("Loading model '{}'", self.name);
        let config_path = self.store.resolve_file(&self.name, &[CONFIG_FILE])?;
        let weights_path = self.store.resolve_file(&self.name, &WEIGHT_FILES)?;

        let checkpoint = CheckpointLoader::new(&self.name, config_path, weights_path);
        let model = checkpoint.load_model::<B>(&self.device)?;
        let inferencer = Inferencer::new(model, self.device.clone());

        tracing::info!("Model '{}' ready ({} positions)", self.name, inferencer.max_positions());
        Ok(self.model.insert(inferencer))
    }

    fn get(&self) -> Option<&Inferencer<B>> {
        self.model.as_ref()
    }

    fn into_handle(self) -> Option<Inferencer<B>> {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::QaError;
    use burn::backend::NdArray;

    #[test]
    fn test_nothing_is_loaded_before_load() {
        let cache = tempfile::tempdir().unwrap();
        let store = ResourceStore::offline(cache.path());
        let loader = ModelLoader::<NdArray>::new("some-model", &store, Default::default());
        assert_eq!(loader.name(), "some-model");
        assert!(loader.get().is_none());
    }

    #[test]
    fn test_unknown_model_is_not_found_and_stays_empty() {
        let cache = tempfile::tempdir().unwrap();
        let store = ResourceStore::offline(cache.path());
        let mut loader = ModelLoader::<NdArray>::new("no-such-model", &store, Default::default());
        assert!(matches!(loader.load(), Err(QaError::ResourceNotFound { .. })));
        assert!(loader.get().is_none());
        assert!(loader.into_handle().is_none());
    }

    #[test]
    fn test_checkpoint_without_weights_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{}").unwrap();
        let store = ResourceStore::offline(dir.path().join("cache"));
        let mut loader =
            ModelLoader::<NdArray>::new(dir.path().to_str().unwrap(), &store, Default::default());
        match loader.load() {
            Err(QaError::ResourceNotFound { tried, .. }) => {
                assert_eq!(tried, "model.safetensors | pytorch_model.bin");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("loaded a model without weights"),
        }
    }

    #[test]
    fn test_local_checkpoint_loads_once() {
        let dir = tempfile::tempdir().unwrap();
        crate::infra::fixtures::write_checkpoint(dir.path());
        let store = ResourceStore::offline(dir.path().join("cache"));

        let mut loader =
            ModelLoader::<NdArray>::new(dir.path().to_str().unwrap(), &store, Default::default());
        assert_eq!(loader.load().unwrap().max_positions(), 16);
        assert!(loader.get().is_some());
        assert_eq!(loader.into_handle().unwrap().max_positions(), 16);
    }
}
