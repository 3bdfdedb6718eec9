//! How a run ends: what is printed, where, and with which exit status.

use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser};
use crossterm::style::Stylize;

use crate::cli::ConnectBotCli;

/// Outcome that ends the process.
#[derive(Debug, PartialEq, Eq)]
pub enum Termination {
    /// Text for stdout (connected services, help, version); exit 0.
    Output(String),
    /// Error message for stderr, reported with the help text; exit 1.
    Failure(String),
}

impl Termination {
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Output(_) => 0,
            Self::Failure(_) => 1,
        }
    }
}

/// Parse the full argument list, program name included.
///
/// A bare invocation, `--help` and `--version` end the run successfully with
/// their text; any other parse error is a failure.
pub fn parse_invocation<I, T>(args: I) -> Result<ConnectBotCli, Termination>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() < 2 {
        return Err(Termination::Output(help_text()));
    }

    ConnectBotCli::try_parse_from(args).map_err(|error| match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Termination::Output(error.render().to_string()),
        _ => Termination::Failure(describe_parse_error(&error)),
    })
}

fn describe_parse_error(error: &clap::Error) -> String {
    if error.kind() == ErrorKind::UnknownArgument
        && let Some(ContextValue::String(flag)) = error.get(ContextKind::InvalidArg)
    {
        return format!("Unknown arguments: {}", flag);
    }
    error.render().to_string()
}

/// First line of `message`, without clap's `error: ` prefix.
pub fn error_headline(message: &str) -> &str {
    let first_line = message.lines().next().unwrap_or_default();
    first_line.strip_prefix("error: ").unwrap_or(first_line)
}

/// Headline (red when `colored`) followed by the help text.
pub fn error_report(message: &str, colored: bool) -> String {
    let headline = error_headline(message);
    let headline = if colored {
        headline.red().to_string()
    } else {
        headline.to_string()
    };
    format!("{}\n{}", headline, help_text())
}

fn help_text() -> String {
    ConnectBotCli::command().render_help().to_string()
}
