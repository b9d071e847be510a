// ============================================================
// Layer 4 — Context Loader
// ============================================================
// Produces the session's Context from exactly one source:
//
//   ContextLoader::File(path)    → whole file, read as UTF-8
//   ContextLoader::Literal(text) → the string as given
//
// Both paths reject a blank passage with a configuration
// error, so the caller finds out before any model is loaded.

use std::{fs, path::{Path, PathBuf}};

use crate::domain::context::Context;
use crate::domain::error::{QaError, QaResult};
use crate::domain::traits::ContextSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextLoader {
    File(PathBuf),
    Literal(String),
}

impl ContextLoader {
    /// Pick the context source from the two mutually exclusive CLI inputs.
    pub fn from_choice(file: Option<PathBuf>, literal: Option<String>) -> QaResult<Self> {
        match (file, literal) {
            (Some(path), None) => Ok(Self::File(path)),
            (None, Some(text)) => Ok(Self::Literal(text)),
            (Some(_), Some(_)) => Err(QaError::Configuration(
                "--context-file and --context are mutually exclusive".to_string(),
            )),
            (None, None) => Err(QaError::Configuration(
                "either --context-file or --context must be provided".to_string(),
            )),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(path)    => format!("file '{}'", path.display()),
            Self::Literal(text) => format!("literal ({} chars)", text.chars().count()),
        }
    }
}

/// Read the entire file as the context.
pub fn load_from_file(path: &Path) -> QaResult<Context> {
    let text = fs::read_to_string(path).map_err(|e| QaError::io(path, e))?;
    tracing::debug!("Read context from '{}' ({} bytes)", path.display(), text.len());
    Ok(Context::from_literal(text))
}

impl ContextSource for ContextLoader {
    fn load_context(&self) -> QaResult<Context> {
        let context = match self {
            Self::File(path)    => load_from_file(path)?,
            Self::Literal(text) => Context::from_literal(text.clone()),
        };
        let context = context.ensure_non_empty()?;
        tracing::info!("Loaded context from {}", self.describe());
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_literal_source_is_untouched() {
        let loader = ContextLoader::Literal("  The tower is in Paris.  ".to_string());
        let ctx = loader.load_context().unwrap();
        assert_eq!(ctx.as_str(), "  The tower is in Paris.  ");
    }

    #[test]
    fn test_file_source_reads_whole_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "line one\nline two\n").unwrap();

        let loader = ContextLoader::File(file.path().to_path_buf());
        let ctx = loader.load_context().unwrap();
        assert_eq!(ctx.as_str(), "line one\nline two\n");
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ContextLoader::File(dir.path().join("nope.txt"));
        assert!(matches!(loader.load_context(), Err(QaError::Io { .. })));
    }

    #[test]
    fn test_empty_file_is_a_configuration_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let loader = ContextLoader::File(file.path().to_path_buf());
        assert!(loader.load_context().unwrap_err().is_configuration());
    }

    #[test]
    fn test_exactly_one_source_is_required() {
        assert!(ContextLoader::from_choice(None, None).unwrap_err().is_configuration());
        assert!(ContextLoader::from_choice(Some("a.txt".into()), Some("text".into()))
            .unwrap_err()
            .is_configuration());
        assert_eq!(
            ContextLoader::from_choice(None, Some("text".into())).unwrap(),
            ContextLoader::Literal("text".into())
        );
    }
}
