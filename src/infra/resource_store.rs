// ============================================================
// Layer 6 — Resource Store
// ============================================================
// Turns a model / tokenizer identifier into files on disk.
// For every required file the candidates are tried in order,
// and for each candidate:
//
//   1. `name` is an existing directory  → read from it, never download
//   2. cached copy                      → <cache>/models--<org>--<repo>/<file>
//   3. hub download (unless offline)    → saved into the cache
//
// Nothing found is a ResourceNotFound error listing what was
// looked for.
//
// Example cache layout:
//   ~/.cache/extractive-qa/
//     models--bert-large-uncased-whole-word-masking-finetuned-squad/
//       config.json
//       model.safetensors
//       tokenizer.json

use std::path::{Path, PathBuf};

use crate::domain::error::{QaError, QaResult};
use crate::infra::config::AppConfig;
use crate::infra::hub::HubClient;

pub struct ResourceStore {
    cache_dir: PathBuf,
    revision:  String,
    hub:       Option<HubClient>,
}

impl ResourceStore {
    /// Store that only looks at local directories and the cache.
    pub fn offline(cache_dir: impl Into<PathBuf>) -> Self {
        Self { cache_dir: cache_dir.into(), revision: "main".to_string(), hub: None }
    }

    pub fn from_config(cfg: &AppConfig) -> QaResult<Self> {
        let hub = if cfg.hub.offline {
            None
        } else {
            HubClient::new(&cfg.hub.endpoint)?
        };
        if hub.is_none() {
            tracing::info!("Hub downloads disabled; using local files only");
        }
        Ok(Self {
            cache_dir: cfg.cache_dir(),
            revision:  cfg.model.revision.clone(),
            hub,
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cache folder for one identifier. Hub names contain '/', which
    /// becomes '--' so every repository gets a single flat folder.
    /// Names that could point outside the cache are not identifiers.
    pub fn repo_dir(&self, name: &str) -> QaResult<PathBuf> {
        let unsafe_name = name.is_empty()
            || name.contains('\\')
            || name.starts_with('/')
            || name.split('/').any(|part| part.is_empty() || part == "." || part == "..");
        if unsafe_name {
            return Err(QaError::ResourceNotFound {
                name:  name.to_string(),
                tried: "a hub identifier of the form <org>/<repo> or <repo>".to_string(),
            });
        }
        Ok(self.cache_dir.join(format!("models--{}", name.replace('/', "--"))))
    }

    /// Resolve the first of `candidates` that exists for `name`.
    pub fn resolve_file(&self, name: &str, candidates: &[&str]) -> QaResult<PathBuf> {
        let local = Path::new(name);
        if local.is_dir() {
            return candidates
                .iter()
                .map(|file| local.join(file))
                .find(|path| path.is_file())
                .ok_or_else(|| not_found(name, candidates));
        }

        let repo_dir = self.repo_dir(name)?;
        if let Some(path) = candidates
            .iter()
            .map(|file| repo_dir.join(file))
            .find(|path| path.is_file())
        {
            tracing::debug!("Cache hit: {}", path.display());
            return Ok(path);
        }

        if let Some(hub) = &self.hub {
            for file in candidates {
                let target = repo_dir.join(file);
                if hub.download(name, &self.revision, file, &target)? {
                    return Ok(target);
                }
            }
        }

        Err(not_found(name, candidates))
    }
}

fn not_found(name: &str, candidates: &[&str]) -> QaError {
    QaError::ResourceNotFound {
        name:  name.to_string(),
        tried: candidates.join(" | "),
    }
}
