use msbot_botfile::BotFileError;
use msbot_types::ArgumentError;
use thiserror::Error;

/// Failures of a connect run. All of them are terminal.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// Missing or malformed arguments, including a malformed JSON overlay.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// The JSON overlay could not be read.
    #[error("unable to read arguments from {source_name}: {source}")]
    InputRead {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// The bot configuration document could not be loaded.
    #[error(transparent)]
    ConfigLoad(BotFileError),

    /// The document refused a service.
    #[error(transparent)]
    ConfigConnect(BotFileError),

    /// The bot configuration document could not be saved.
    #[error(transparent)]
    ConfigSave(BotFileError),
}
