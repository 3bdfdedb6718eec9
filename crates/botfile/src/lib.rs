//! Bot configuration documents for `msbot connect bot`.
//!
//! [`BotDocument`] is the contract the connect command relies on;
//! [`BotConfiguration`] implements it over a JSON `.bot` file and
//! [`InMemoryBotDocument`] implements it without touching disk.

pub mod bot_configuration;
pub mod document;
pub mod path_processing;

pub use bot_configuration::{BOT_FILE_EXTENSION, BotConfiguration};
pub use document::{BotDocument, BotFileError, InMemoryBotDocument};
pub use path_processing::expand_tilde;
