use std::path::PathBuf;

use clap::Parser;
use msbot_types::ConnectBotFlags;

use crate::input::OverlaySource;

/// Command-line surface of `msbot connect bot`.
#[derive(Debug, Parser)]
#[command(name = "msbot connect bot", about = "Connect the bot to Azure Bot Service", version)]
pub struct ConnectBotCli {
    /// Azure Bot Service bot id
    #[arg(long = "serviceName", value_name = "serviceName")]
    pub service_name: Option<String>,

    /// Friendly name for this service (defaults to serviceName)
    #[arg(short = 'n', long = "name", value_name = "name")]
    pub name: Option<String>,

    /// id of the tenant for the Azure service (either GUID or xxx.onmicrosoft.com)
    #[arg(short = 't', long = "tenantId", value_name = "tenantId")]
    pub tenant_id: Option<String>,

    /// GUID of the subscription for the Azure Service
    #[arg(short = 's', long = "subscriptionId", value_name = "subscriptionId")]
    pub subscription_id: Option<String>,

    /// name of the resourceGroup for the Azure Service
    #[arg(short = 'r', long = "resourceGroup", value_name = "resourceGroup")]
    pub resource_group: Option<String>,

    /// (OPTIONAL) Registered endpoint url for the Azure Bot Service
    #[arg(short = 'e', long = "endpoint", value_name = "endpoint")]
    pub endpoint: Option<String>,

    /// (OPTIONAL) Microsoft AppId for the Azure Bot Service
    #[arg(short = 'a', long = "appId", value_name = "appid")]
    pub app_id: Option<String>,

    /// (OPTIONAL) Microsoft AppPassword for the Azure Bot Service
    #[arg(short = 'p', long = "appPassword", value_name = "appPassword")]
    pub app_password: Option<String>,

    /// path to bot file.  If omitted, local folder will look for a .bot file
    #[arg(short = 'b', long = "bot", value_name = "path")]
    pub bot: Option<PathBuf>,

    /// path to arguments in JSON format { serviceName:'', tenantId:'', ... }
    #[arg(long = "input", value_name = "jsonfile")]
    pub input: Option<PathBuf>,

    /// bot file secret password for encrypting service secrets
    #[arg(long = "secret", value_name = "secret")]
    pub secret: Option<String>,

    /// arguments are passed in as JSON object via stdin
    #[arg(long = "stdin")]
    pub stdin: bool,
}

impl ConnectBotCli {
    /// Connection arguments supplied as flags.
    pub fn flags(&self) -> ConnectBotFlags {
        ConnectBotFlags {
            service_name: self.service_name.clone(),
            name: self.name.clone(),
            tenant_id: self.tenant_id.clone(),
            subscription_id: self.subscription_id.clone(),
            resource_group: self.resource_group.clone(),
            endpoint: self.endpoint.clone(),
            app_id: self.app_id.clone(),
            app_password: self.app_password.clone(),
            secret: self.secret.clone(),
        }
    }

    /// Where to read the JSON argument overlay from. `--stdin` wins over `--input`.
    pub fn overlay_source(&self) -> Option<OverlaySource> {
        if self.stdin {
            Some(OverlaySource::Stdin)
        } else {
            self.input.clone().map(OverlaySource::File)
        }
    }
}
