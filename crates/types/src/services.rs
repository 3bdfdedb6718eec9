//! Service descriptors stored in a `.bot` file.
//!
//! Each descriptor serializes to the exact JSON shape found in the `services`
//! array of a bot configuration document, with a `type` discriminator that
//! identifies the hosting service kind.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of connected services this tool can register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    /// Azure Bot Service registration.
    #[serde(rename = "abs")]
    Bot,
    /// Messaging endpoint the hosting service forwards traffic to.
    #[serde(rename = "endpoint")]
    Endpoint,
}

impl ServiceType {
    /// Value written to the `type` field of the `.bot` file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bot => "abs",
            Self::Endpoint => "endpoint",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registration of a bot with a cloud subscription, tenant and resource group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotService {
    /// Identifier assigned by the configuration document when connected.
    #[serde(default)]
    pub id: String,
    /// Friendly name (defaults to `service_name`).
    pub name: String,
    /// Azure Bot Service bot id.
    pub service_name: String,
    pub tenant_id: String,
    pub subscription_id: String,
    pub resource_group: String,
}

/// Messaging endpoint and the application credentials used to reach it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointService {
    #[serde(default)]
    pub id: String,
    /// Friendly name (defaults to `endpoint`).
    pub name: String,
    pub app_id: String,
    pub app_password: String,
    pub endpoint: String,
}

impl fmt::Debug for EndpointService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointService")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("app_id", &self.app_id)
            .field("app_password", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// A descriptor ready to be appended to a bot configuration document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConnectedService {
    #[serde(rename = "abs")]
    Bot(BotService),
    #[serde(rename = "endpoint")]
    Endpoint(EndpointService),
}

impl ConnectedService {
    pub fn service_type(&self) -> ServiceType {
        match self {
            Self::Bot(_) => ServiceType::Bot,
            Self::Endpoint(_) => ServiceType::Endpoint,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Bot(service) => &service.id,
            Self::Endpoint(service) => &service.id,
        }
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        match self {
            Self::Bot(service) => service.id = id,
            Self::Endpoint(service) => service.id = id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Bot(service) => &service.name,
            Self::Endpoint(service) => &service.name,
        }
    }
}

impl From<BotService> for ConnectedService {
    fn from(service: BotService) -> Self {
        Self::Bot(service)
    }
}

impl From<EndpointService> for ConnectedService {
    fn from(service: EndpointService) -> Self {
        Self::Endpoint(service)
    }
}
