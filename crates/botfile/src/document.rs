//! The configuration document contract and an in-memory implementation.
//!
//! A document accepts connected services one at a time and persists itself
//! on request. Ids are assigned by the document, not by callers: a service
//! without an id receives one greater than the highest numeric id already
//! present.

use std::path::PathBuf;

use msbot_types::{ConnectedService, ServiceType};
use thiserror::Error;

/// Errors surfaced by bot configuration documents.
#[derive(Debug, Error)]
pub enum BotFileError {
    /// The bot file could not be read.
    #[error("unable to read {path}: {source}", path = .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The bot file could not be written.
    #[error("unable to write {path}: {source}", path = .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The bot file is not valid JSON or does not have the expected shape.
    #[error("{path} is not a valid bot file: {source}", path = .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Serialization failure while connecting or saving.
    #[error("bot file serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// No `.bot` file exists in the searched folder.
    #[error(
        "no bot file found in {folder}. Choose a different location or use msbot init to create a .bot file.",
        folder = .0.display()
    )]
    NoBotFile(PathBuf),
    /// The document is protected and no secret was supplied.
    #[error("{path} is protected by a secret; pass it with --secret", path = .0.display())]
    SecretRequired(PathBuf),
    /// A service with the same type and id is already connected.
    #[error("service with {id} is already connected ({service_type})")]
    DuplicateService { service_type: ServiceType, id: String },
}

/// A configuration document that services can be connected to.
#[async_trait::async_trait]
pub trait BotDocument: Send {
    /// Append `service`, assigning an id when it has none. Returns the id.
    fn connect_service(&mut self, service: &mut ConnectedService) -> Result<String, BotFileError>;

    /// Persist the document. `secret` is the bot file secret, when supplied.
    async fn save(&mut self, secret: Option<&str>) -> Result<(), BotFileError>;
}

/// Next free id given the ids already present. Non-numeric ids are ignored.
pub(crate) fn next_service_id<'a>(existing_ids: impl IntoIterator<Item = &'a str>) -> String {
    let highest = existing_ids
        .into_iter()
        .filter_map(|id| id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (highest + 1).to_string()
}

/// Assign an id to `service` or reject it when `(type, id)` is already taken.
pub(crate) fn assign_service_id<'a>(
    service: &mut ConnectedService,
    existing: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<(), BotFileError> {
    if service.id().is_empty() {
        service.set_id(next_service_id(existing.into_iter().map(|(_, id)| id)));
        return Ok(());
    }

    let service_type = service.service_type();
    let taken = existing
        .into_iter()
        .any(|(kind, id)| kind == service_type.as_str() && id == service.id());
    if taken {
        return Err(BotFileError::DuplicateService {
            service_type,
            id: service.id().to_string(),
        });
    }
    Ok(())
}

/// In-memory document primarily used for unit testing.
#[derive(Debug, Default)]
pub struct InMemoryBotDocument {
    services: Vec<ConnectedService>,
    save_count: usize,
    last_secret: Option<String>,
}

impl InMemoryBotDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn services(&self) -> &[ConnectedService] {
        &self.services
    }

    /// Number of times [`BotDocument::save`] has been called.
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// Secret passed to the most recent save.
    pub fn last_secret(&self) -> Option<&str> {
        self.last_secret.as_deref()
    }
}

#[async_trait::async_trait]
impl BotDocument for InMemoryBotDocument {
    fn connect_service(&mut self, service: &mut ConnectedService) -> Result<String, BotFileError> {
        let existing: Vec<(&str, &str)> = self
            .services
            .iter()
            .map(|connected| (connected.service_type().as_str(), connected.id()))
            .collect();
        assign_service_id(service, existing.iter().copied())?;
        self.services.push(service.clone());
        Ok(service.id().to_string())
    }

    async fn save(&mut self, secret: Option<&str>) -> Result<(), BotFileError> {
        self.save_count += 1;
        self.last_secret = secret.map(str::to_string);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msbot_types::{BotService, EndpointService};

    fn bot_service() -> ConnectedService {
        ConnectedService::Bot(BotService {
            id: String::new(),
            name: "mybot".into(),
            service_name: "mybot".into(),
            tenant_id: "contoso.onmicrosoft.com".into(),
            subscription_id: "7d1c9a3e-5b2f-4c8d-a6e0-3f9b1d7c5e2a".into(),
            resource_group: "bots".into(),
        })
    }

    fn endpoint_service(id: &str) -> ConnectedService {
        ConnectedService::Endpoint(EndpointService {
            id: id.into(),
            name: "local".into(),
            app_id: "0b5e7c2a-1f3d-4e8a-9c6b-2d4f6a8b0c1e".into(),
            app_password: "pw".into(),
            endpoint: "http://localhost:3978/api/messages".into(),
        })
    }

    #[test]
    fn next_id_skips_non_numeric_ids() {
        assert_eq!(next_service_id(std::iter::empty()), "1");
        assert_eq!(next_service_id(["2", "abc", "10", "7"]), "11");
    }

    #[test]
    fn in_memory_assigns_sequential_ids() {
        let mut document = InMemoryBotDocument::new();
        let mut first = bot_service();
        let mut second = endpoint_service("");

        assert_eq!(document.connect_service(&mut first).unwrap(), "1");
        assert_eq!(document.connect_service(&mut second).unwrap(), "2");
        assert_eq!(first.id(), "1");
        assert_eq!(document.services().len(), 2);
    }

    #[test]
    fn duplicate_type_and_id_rejected() {
        let mut document = InMemoryBotDocument::new();
        document.connect_service(&mut endpoint_service("5")).unwrap();

        let error = document.connect_service(&mut endpoint_service("5")).unwrap_err();
        assert!(matches!(error, BotFileError::DuplicateService { .. }));

        let mut bot = bot_service();
        bot.set_id("5");
        assert!(document.connect_service(&mut bot).is_ok());
    }

    #[tokio::test]
    async fn in_memory_save_records_secret() {
        let mut document = InMemoryBotDocument::new();
        document.save(Some("pw")).await.unwrap();
        document.save(None).await.unwrap();
        assert_eq!(document.save_count(), 2);
        assert_eq!(document.last_secret(), None);
    }
}
