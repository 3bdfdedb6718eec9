//! The connect flow: load the bot file, merge arguments, validate, register
//! the services and save.

use std::path::Path;

use msbot_botfile::{BotConfiguration, BotDocument};
use msbot_types::{ConnectBotFlags, ConnectBotSettings, ConnectedService};
use tokio::io::AsyncRead;
use tracing::{debug, info};

use crate::cli::ConnectBotCli;
use crate::error::ConnectError;
use crate::input::read_overlay;

/// Execute a full connect run. `working_dir` is searched for a `.bot` file
/// when `--bot` was not given; `stdin` backs `--stdin`.
pub async fn run_connect<R>(cli: &ConnectBotCli, working_dir: &Path, stdin: R) -> Result<Vec<ConnectedService>, ConnectError>
where
    R: AsyncRead + Unpin,
{
    let secret = cli.secret.as_deref();
    let mut document = match &cli.bot {
        Some(path) => BotConfiguration::load(path, secret).await,
        None => BotConfiguration::load_from_folder(working_dir, secret).await,
    }
    .map_err(ConnectError::ConfigLoad)?;

    let overlay = match cli.overlay_source() {
        Some(origin) => Some(read_overlay(&origin, stdin).await?),
        None => None,
    };
    let settings = ConnectBotSettings::merge(ConnectBotFlags::default(), cli.flags(), overlay);

    connect_services(&mut document, &settings).await
}

/// Validate `settings`, connect the resulting descriptors to `document` and
/// save it once.
///
/// Nothing is connected or saved unless every argument validates. The
/// returned descriptors carry the ids assigned by the document.
pub async fn connect_services<D>(document: &mut D, settings: &ConnectBotSettings) -> Result<Vec<ConnectedService>, ConnectError>
where
    D: BotDocument + ?Sized,
{
    let connection = settings.validate()?;
    debug!(?connection, "Validated connection arguments");

    let mut services = connection.into_services();
    for service in services.iter_mut() {
        let id = document.connect_service(service).map_err(ConnectError::ConfigConnect)?;
        info!(service_type = %service.service_type(), id = %id, name = service.name(), "Connected service");
    }

    document.save(settings.secret()).await.map_err(ConnectError::ConfigSave)?;
    Ok(services)
}
