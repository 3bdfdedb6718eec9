//! JSON-backed `.bot` configuration document.
//!
//! The file layout mirrors the bot configuration format used by the Bot
//! Framework tooling: a top-level object with `name`, `description`,
//! `services`, `padlock` and `version`. Services are kept as raw JSON so that
//! entries of kinds this tool does not model (LUIS, QnA, storage, ...) survive
//! a load/save cycle untouched, as do unknown top-level keys.
//!
//! Encryption of service secrets is not performed here. A secret supplied to
//! [`BotConfiguration::save`] is accepted and a warning is logged.

use std::path::{Path, PathBuf};

use msbot_types::ConnectedService;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::document::{BotDocument, BotFileError, assign_service_id};
use crate::path_processing::expand_tilde;

/// File extension identifying bot configuration files.
pub const BOT_FILE_EXTENSION: &str = "bot";

/// Version written to documents that do not declare one.
pub const DEFAULT_BOT_FILE_VERSION: &str = "2.0";

fn default_version() -> String {
    DEFAULT_BOT_FILE_VERSION.to_string()
}

/// A bot configuration document loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfiguration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    services: Vec<Value>,
    /// Non-empty when the document's secrets are protected by a bot file secret.
    #[serde(default)]
    pub padlock: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
    #[serde(skip)]
    path: PathBuf,
}

impl BotConfiguration {
    /// Load the document stored at `path`.
    ///
    /// Fails with [`BotFileError::SecretRequired`] when the document is
    /// padlocked and no secret is supplied.
    pub async fn load(path: impl AsRef<Path>, secret: Option<&str>) -> Result<Self, BotFileError> {
        let path = expand_tilde(path.as_ref());
        let content = tokio::fs::read_to_string(&path).await.map_err(|source| BotFileError::Read {
            path: path.clone(),
            source,
        })?;
        let mut configuration: BotConfiguration =
            serde_json::from_str(&content).map_err(|source| BotFileError::Parse {
                path: path.clone(),
                source,
            })?;

        if !configuration.padlock.is_empty() && secret.is_none_or(str::is_empty) {
            return Err(BotFileError::SecretRequired(path));
        }

        debug!(
            path = %path.display(),
            services = configuration.services.len(),
            "Loaded bot configuration"
        );
        configuration.path = path;
        Ok(configuration)
    }

    /// Load the first `.bot` file (by file name) found in `folder`.
    pub async fn load_from_folder(folder: impl AsRef<Path>, secret: Option<&str>) -> Result<Self, BotFileError> {
        let folder = folder.as_ref();
        let path = find_bot_file(folder)
            .await?
            .ok_or_else(|| BotFileError::NoBotFile(folder.to_path_buf()))?;
        Self::load(path, secret).await
    }

    /// Path the document was loaded from and will be saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw service entries, in file order.
    pub fn services(&self) -> &[Value] {
        &self.services
    }

    fn service_keys(&self) -> Vec<(&str, String)> {
        self.services
            .iter()
            .map(|service| {
                let kind = service.get("type").and_then(Value::as_str).unwrap_or_default();
                (kind, service_id(service))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl BotDocument for BotConfiguration {
    fn connect_service(&mut self, service: &mut ConnectedService) -> Result<String, BotFileError> {
        let keys = self.service_keys();
        assign_service_id(service, keys.iter().map(|(kind, id)| (*kind, id.as_str())))?;
        self.services.push(serde_json::to_value(&*service)?);
        debug!(
            service_type = %service.service_type(),
            id = service.id(),
            name = service.name(),
            "Connected service"
        );
        Ok(service.id().to_string())
    }

    async fn save(&mut self, secret: Option<&str>) -> Result<(), BotFileError> {
        if secret.is_some_and(|secret| !secret.is_empty()) {
            warn!(
                path = %self.path.display(),
                "Secret supplied but service secrets are stored unencrypted by the JSON bot file store"
            );
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|source| BotFileError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|source| BotFileError::Write {
                path: self.path.clone(),
                source,
            })?;
        info!(path = %self.path.display(), "Saved bot configuration");
        Ok(())
    }
}

/// Id of a raw service entry. Hand-edited files may store ids as numbers.
fn service_id(service: &Value) -> String {
    match service.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    }
}

async fn find_bot_file(folder: &Path) -> Result<Option<PathBuf>, BotFileError> {
    let read_error = |source: std::io::Error| BotFileError::Read {
        path: folder.to_path_buf(),
        source,
    };
    let mut entries = tokio::fs::read_dir(folder).await.map_err(read_error)?;
    let mut candidates = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_error)? {
        let path = entry.path();
        let is_bot_file = path.extension().is_some_and(|extension| extension == BOT_FILE_EXTENSION);
        if is_bot_file && entry.file_type().await.map_err(read_error)?.is_file() {
            candidates.push(path);
        }
    }
    candidates.sort();
    Ok(candidates.into_iter().next())
}
