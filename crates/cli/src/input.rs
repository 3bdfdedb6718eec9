//! Reading the JSON argument overlay from stdin or a file.

use std::path::PathBuf;

use msbot_types::ConnectBotOverlay;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use crate::error::ConnectError;

/// Origin of the JSON argument overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlaySource {
    Stdin,
    File(PathBuf),
}

impl OverlaySource {
    fn describe(&self) -> String {
        match self {
            Self::Stdin => "stdin".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Read and parse the overlay from `origin`. `stdin` is only read when the
/// origin is [`OverlaySource::Stdin`].
pub async fn read_overlay<R>(origin: &OverlaySource, stdin: R) -> Result<ConnectBotOverlay, ConnectError>
where
    R: AsyncRead + Unpin,
{
    let text = match origin {
        OverlaySource::Stdin => read_text(stdin, origin).await?,
        OverlaySource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|error| ConnectError::InputRead {
                source_name: origin.describe(),
                source: error,
            })?,
    };
    debug!(origin = %origin.describe(), bytes = text.len(), "Read JSON arguments");
    Ok(ConnectBotOverlay::from_json_str(&text)?)
}

async fn read_text<R: AsyncRead + Unpin>(mut reader: R, origin: &OverlaySource) -> Result<String, ConnectError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .await
        .map_err(|error| ConnectError::InputRead {
            source_name: origin.describe(),
            source: error,
        })?;
    Ok(text)
}
