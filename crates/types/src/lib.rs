//! Shared types for `msbot connect bot`: service descriptors, the argument
//! merge/validation pipeline and its error taxonomy.

pub mod error;
pub mod services;
pub mod settings;
pub mod validation;

pub use error::ArgumentError;
pub use services::{BotService, ConnectedService, EndpointService, ServiceType};
pub use settings::{ConnectBotFlags, ConnectBotOverlay, ConnectBotSettings, ServiceConnection};
pub use validation::{is_http_url, is_uuid};
