// ============================================================
// Layer 6 — Hub Client
// ============================================================
// Downloads single checkpoint files from a Hugging Face style
// hub:  <endpoint>/<repo>/resolve/<revision>/<file>
//
// Files are streamed to "<file>.part" and renamed once
// complete, so an interrupted download never looks cached.
// Built without the `hub` feature the client does not exist
// and the store stays on local files.

use std::path::Path;

use crate::domain::error::QaResult;

#[cfg(feature = "hub")]
pub use enabled::HubClient;

#[cfg(not(feature = "hub"))]
pub use disabled::HubClient;

#[cfg(feature = "hub")]
mod enabled {
    use super::*;
    use reqwest::{blocking::Client, StatusCode};
    use std::{fs, time::Duration};

    use crate::domain::error::QaError;

    pub struct HubClient {
        endpoint: String,
        client:   Client,
    }

    impl HubClient {
        pub fn new(endpoint: &str) -> QaResult<Option<Self>> {
            let client = Client::builder()
                .user_agent(concat!("extractive-qa/", env!("CARGO_PKG_VERSION")))
                .connect_timeout(Duration::from_secs(30))
                // weights are large; only the connect phase is bounded
                .timeout(Option::<Duration>::None)
                .build()
                .map_err(|e| QaError::Hub { url: endpoint.to_string(), message: e.to_string() })?;
            Ok(Some(Self {
                endpoint: endpoint.trim_end_matches('/').to_string(),
                client,
            }))
        }

        pub fn file_url(&self, repo: &str, revision: &str, file: &str) -> String {
            format!("{}/{}/resolve/{}/{}", self.endpoint, repo, revision, file)
        }

        /// Fetch one file into `target`. `Ok(false)` means the hub does
        /// not have it (unknown repository or missing file).
        pub fn download(&self, repo: &str, revision: &str, file: &str, target: &Path) -> QaResult<bool> {
            let url = self.file_url(repo, revision, file);
            let hub_err = |message: String| QaError::Hub { url: url.clone(), message };

            tracing::info!("Downloading {}", url);
            let mut response = self.client.get(&url).send().map_err(|e| hub_err(e.to_string()))?;

            match response.status() {
                // the hub answers 401 for repositories that do not exist
                StatusCode::NOT_FOUND | StatusCode::UNAUTHORIZED => {
                    tracing::debug!("{} is not on the hub ({})", url, response.status());
                    return Ok(false);
                }
                status if !status.is_success() => {
                    return Err(hub_err(format!("HTTP {status}")));
                }
                _ => {}
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| QaError::io(parent, e))?;
            }
            let partial = partial_path(target, file);
            let mut out = fs::File::create(&partial).map_err(|e| QaError::io(&partial, e))?;
            let copied = response.copy_to(&mut out);
            drop(out);
            let bytes = match copied {
                Ok(bytes) => bytes,
                Err(e) => {
                    discard_partial(&partial);
                    return Err(hub_err(e.to_string()));
                }
            };
            fs::rename(&partial, target).map_err(|e| QaError::io(target, e))?;

            tracing::info!("Saved '{}' ({} bytes)", target.display(), bytes);
            Ok(true)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_interrupted_download_leaves_no_partial_file() {
            let dir = tempfile::tempdir().unwrap();
            let target = dir.path().join("model.safetensors");
            let partial = partial_path(&target, "model.safetensors");
            assert_eq!(partial, dir.path().join("model.safetensors.part"));

            fs::write(&partial, b"half a checkpoint").unwrap();
            discard_partial(&partial);
            assert!(!partial.exists());
            assert!(!target.exists());

            // already gone is fine
            discard_partial(&partial);
        }

        #[test]
        fn test_file_url_layout() {
            let hub = HubClient::new("https://huggingface.co/").unwrap().unwrap();
            assert_eq!(
                hub.file_url("deepset/roberta-base-squad2", "main", "config.json"),
                "https://huggingface.co/deepset/roberta-base-squad2/resolve/main/config.json"
            );
        }
    }
}

/// Where a download is staged before it is renamed to `target`.
#[cfg(feature = "hub")]
fn partial_path(target: &Path, file: &str) -> std::path::PathBuf {
    target.with_file_name(format!("{file}.part"))
}

#[cfg(feature = "hub")]
fn discard_partial(partial: &Path) {
    if let Err(e) = std::fs::remove_file(partial) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Cannot remove '{}': {}", partial.display(), e);
        }
    }
}

#[cfg(not(feature = "hub"))]
mod disabled {
    use super::*;

    pub struct HubClient {
        _private: (),
    }

    impl HubClient {
        pub fn new(_endpoint: &str) -> QaResult<Option<Self>> {
            tracing::warn!("Built without the `hub` feature; checkpoints must already be on disk");
            Ok(None)
        }

        pub fn download(&self, _repo: &str, _revision: &str, _file: &str, _target: &Path) -> QaResult<bool> {
            Ok(false)
        }
    }
}
