//! Connection settings and their merge/validation pipeline.
//!
//! Arguments arrive from up to three ordered sources: built-in defaults,
//! command-line flags, and an optional JSON overlay read from stdin or a file.
//! [`ConnectBotSettings::merge`] is the single point where they are combined;
//! the result is immutable and is validated as a whole by
//! [`ConnectBotSettings::validate`].

use serde::Deserialize;

use crate::error::ArgumentError;
use crate::services::{BotService, ConnectedService, EndpointService};
use crate::validation::{is_http_url, is_uuid};

/// Connection arguments as supplied on the command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectBotFlags {
    pub service_name: Option<String>,
    pub name: Option<String>,
    pub tenant_id: Option<String>,
    pub subscription_id: Option<String>,
    pub resource_group: Option<String>,
    pub endpoint: Option<String>,
    pub app_id: Option<String>,
    pub app_password: Option<String>,
    pub secret: Option<String>,
}

/// Typed schema for the JSON object accepted through `--stdin` or `--input`.
///
/// Keys use the same camelCase spelling as the long flags. Unknown keys are
/// rejected and `null` values are treated as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConnectBotOverlay {
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub resource_group: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub app_password: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
}

impl ConnectBotOverlay {
    /// Parse an overlay from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ArgumentError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Immutable, merged connection settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectBotSettings {
    service_name: Option<String>,
    name: Option<String>,
    tenant_id: Option<String>,
    subscription_id: Option<String>,
    resource_group: Option<String>,
    endpoint: Option<String>,
    app_id: Option<String>,
    app_password: Option<String>,
    secret: Option<String>,
}

/// Descriptors produced from a successful validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConnection {
    pub bot: BotService,
    pub endpoint: Option<EndpointService>,
}

impl ServiceConnection {
    /// Descriptors in registration order: the bot service first, then the endpoint.
    pub fn into_services(self) -> Vec<ConnectedService> {
        let mut services = vec![ConnectedService::Bot(self.bot)];
        if let Some(endpoint) = self.endpoint {
            services.push(ConnectedService::Endpoint(endpoint));
        }
        services
    }
}

impl ConnectBotSettings {
    /// Merge the three argument sources. For each field the overlay wins over
    /// the flags, which win over the defaults.
    pub fn merge(defaults: ConnectBotFlags, flags: ConnectBotFlags, overlay: Option<ConnectBotOverlay>) -> Self {
        let overlay = overlay.unwrap_or_default();
        Self {
            service_name: overlay.service_name.or(flags.service_name).or(defaults.service_name),
            name: overlay.name.or(flags.name).or(defaults.name),
            tenant_id: overlay.tenant_id.or(flags.tenant_id).or(defaults.tenant_id),
            subscription_id: overlay.subscription_id.or(flags.subscription_id).or(defaults.subscription_id),
            resource_group: overlay.resource_group.or(flags.resource_group).or(defaults.resource_group),
            endpoint: overlay.endpoint.or(flags.endpoint).or(defaults.endpoint),
            app_id: overlay.app_id.or(flags.app_id).or(defaults.app_id),
            app_password: overlay.app_password.or(flags.app_password).or(defaults.app_password),
            secret: overlay.secret.or(flags.secret).or(defaults.secret),
        }
    }

    /// Secret handed to the configuration document when it is saved.
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    /// Check every rule in order and build the descriptors.
    ///
    /// The first failing rule is reported. Endpoint arguments are validated
    /// together and only when an endpoint was supplied.
    pub fn validate(&self) -> Result<ServiceConnection, ArgumentError> {
        let service_name = required_text(self.service_name.as_deref(), "serviceName")?;
        let tenant_id = required_text(self.tenant_id.as_deref(), "tenantId")?;
        let subscription_id = required_uuid(self.subscription_id.as_deref(), "subscriptionId")?;
        let resource_group = self
            .resource_group
            .as_deref()
            .filter(|text| !text.is_empty())
            .ok_or(ArgumentError::MissingArgument {
                flag: "resourceGroup",
                detail: " for registered bot",
            })?;

        let bot = BotService {
            id: String::new(),
            name: self.friendly_name().unwrap_or(service_name).to_string(),
            service_name: service_name.to_string(),
            tenant_id: tenant_id.to_string(),
            subscription_id: subscription_id.to_string(),
            resource_group: resource_group.to_string(),
        };

        let endpoint = match self.endpoint.as_deref().filter(|text| !text.is_empty()) {
            Some(endpoint) => Some(self.endpoint_service(endpoint)?),
            None => None,
        };

        Ok(ServiceConnection { bot, endpoint })
    }

    fn endpoint_service(&self, endpoint: &str) -> Result<EndpointService, ArgumentError> {
        if !is_http_url(endpoint) {
            return Err(ArgumentError::InvalidFormat {
                flag: "endpoint",
                expected: "an http or https URL",
            });
        }
        let app_id = required_uuid(self.app_id.as_deref(), "appId")?;
        let app_password = required_text(self.app_password.as_deref(), "appPassword")?;

        Ok(EndpointService {
            id: String::new(),
            name: self.friendly_name().unwrap_or(endpoint).to_string(),
            app_id: app_id.to_string(),
            app_password: app_password.to_string(),
            endpoint: endpoint.to_string(),
        })
    }

    fn friendly_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|text| !text.is_empty())
    }
}

fn required_text<'a>(value: Option<&'a str>, flag: &'static str) -> Result<&'a str, ArgumentError> {
    value.filter(|text| !text.is_empty()).ok_or_else(|| ArgumentError::missing(flag))
}

fn required_uuid<'a>(value: Option<&'a str>, flag: &'static str) -> Result<&'a str, ArgumentError> {
    let text = required_text(value, flag)?;
    if !is_uuid(text) {
        return Err(ArgumentError::InvalidFormat { flag, expected: "a UUID" });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBSCRIPTION: &str = "7d1c9a3e-5b2f-4c8d-a6e0-3f9b1d7c5e2a";
    const APP_ID: &str = "0b5e7c2a-1f3d-4e8a-9c6b-2d4f6a8b0c1e";

    fn required_flags() -> ConnectBotFlags {
        ConnectBotFlags {
            service_name: Some("mybot".into()),
            tenant_id: Some("contoso.onmicrosoft.com".into()),
            subscription_id: Some(SUBSCRIPTION.into()),
            resource_group: Some("bots".into()),
            ..ConnectBotFlags::default()
        }
    }

    fn with_endpoint(mut flags: ConnectBotFlags) -> ConnectBotFlags {
        flags.endpoint = Some("https://mybot.azurewebsites.net/api/messages".into());
        flags.app_id = Some(APP_ID.into());
        flags.app_password = Some("s3cr3t".into());
        flags
    }

    fn settings(flags: ConnectBotFlags) -> ConnectBotSettings {
        ConnectBotSettings::merge(ConnectBotFlags::default(), flags, None)
    }

    fn error_message(flags: ConnectBotFlags) -> String {
        settings(flags).validate().unwrap_err().to_string()
    }

    #[test]
    fn required_fields_produce_single_bot_service() {
        let connection = settings(required_flags()).validate().unwrap();
        assert_eq!(connection.bot.name, "mybot");
        assert_eq!(connection.bot.service_name, "mybot");
        assert_eq!(connection.bot.subscription_id, SUBSCRIPTION);
        assert!(connection.endpoint.is_none());
        assert_eq!(connection.into_services().len(), 1);
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        let mut flags = required_flags();
        flags.service_name = None;
        flags.tenant_id = None;
        assert_eq!(error_message(flags), "Bad or missing --serviceName");

        let mut flags = required_flags();
        flags.tenant_id = Some(String::new());
        assert_eq!(error_message(flags), "Bad or missing --tenantId");

        let mut flags = required_flags();
        flags.subscription_id = None;
        assert_eq!(error_message(flags), "Bad or missing --subscriptionId");

        let mut flags = required_flags();
        flags.resource_group = None;
        assert_eq!(error_message(flags), "Bad or missing --resourceGroup for registered bot");
    }

    #[test]
    fn subscription_must_be_uuid() {
        let mut flags = with_endpoint(required_flags());
        flags.subscription_id = Some("not-a-uuid".into());
        let error = settings(flags).validate().unwrap_err();
        assert!(matches!(error, ArgumentError::InvalidFormat { flag: "subscriptionId", .. }));
        assert_eq!(error.to_string(), "Bad or missing --subscriptionId");
    }

    #[test]
    fn endpoint_builds_second_descriptor() {
        let connection = settings(with_endpoint(required_flags())).validate().unwrap();
        let endpoint = connection.endpoint.clone().unwrap();
        assert_eq!(endpoint.name, "https://mybot.azurewebsites.net/api/messages");
        assert_eq!(endpoint.app_id, APP_ID);

        let services = connection.into_services();
        assert_eq!(services.len(), 2);
        assert!(matches!(services[1], ConnectedService::Endpoint(_)));
    }

    #[test]
    fn name_overrides_both_defaults() {
        let mut flags = with_endpoint(required_flags());
        flags.name = Some("friendly".into());
        let connection = settings(flags).validate().unwrap();
        assert_eq!(connection.bot.name, "friendly");
        assert_eq!(connection.endpoint.unwrap().name, "friendly");
    }

    #[test]
    fn empty_name_falls_back() {
        let mut flags = required_flags();
        flags.name = Some(String::new());
        assert_eq!(settings(flags).validate().unwrap().bot.name, "mybot");
    }

    #[test]
    fn endpoint_arguments_validate_together() {
        let mut flags = with_endpoint(required_flags());
        flags.endpoint = Some("ftp://mybot.example.com/api/messages".into());
        assert_eq!(error_message(flags), "Bad or missing --endpoint");

        let mut flags = with_endpoint(required_flags());
        flags.endpoint = Some("http://localhost:3978/api/messages".into());
        flags.app_id = Some("nope".into());
        assert_eq!(error_message(flags), "Bad or missing --appId");

        let mut flags = with_endpoint(required_flags());
        flags.app_password = None;
        assert_eq!(error_message(flags), "Bad or missing --appPassword");
    }

    #[test]
    fn app_credentials_ignored_without_endpoint() {
        let mut flags = required_flags();
        flags.app_id = Some("nope".into());
        let connection = settings(flags).validate().unwrap();
        assert!(connection.endpoint.is_none());
    }

    #[test]
    fn overlay_overrides_flags_and_flags_override_defaults() {
        let defaults = ConnectBotFlags {
            resource_group: Some("default-rg".into()),
            tenant_id: Some("default-tenant".into()),
            ..ConnectBotFlags::default()
        };
        let mut flags = required_flags();
        flags.resource_group = None;
        let overlay = ConnectBotOverlay::from_json_str(r#"{"serviceName":"X","secret":"pw","name":null}"#).unwrap();

        let merged = ConnectBotSettings::merge(defaults, flags, Some(overlay));
        assert_eq!(merged.secret(), Some("pw"));

        let connection = merged.validate().unwrap();
        assert_eq!(connection.bot.service_name, "X");
        assert_eq!(connection.bot.name, "X");
        assert_eq!(connection.bot.tenant_id, "contoso.onmicrosoft.com");
        assert_eq!(connection.bot.resource_group, "default-rg");
    }

    #[test]
    fn overlay_rejects_unknown_keys_and_bad_shapes() {
        assert!(ConnectBotOverlay::from_json_str(r#"{"serviceName":"X","colour":"red"}"#).is_err());
        assert!(ConnectBotOverlay::from_json_str(r#"{"bot":"other.bot"}"#).is_err());
        assert!(ConnectBotOverlay::from_json_str(r#"["serviceName"]"#).is_err());
        assert!(ConnectBotOverlay::from_json_str(r#"{"tenantId":42}"#).is_err());
        assert!(matches!(
            ConnectBotOverlay::from_json_str("not json"),
            Err(ArgumentError::InvalidInput(_))
        ));
    }
}
