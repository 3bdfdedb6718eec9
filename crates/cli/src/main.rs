use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::{Context, Result};
use msbot_types::ConnectedService;

mod cli;
mod connect;
mod error;
mod input;
mod report;

use cli::ConnectBotCli;
use report::Termination;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = match report::parse_invocation(std::env::args_os()) {
        Ok(cli) => cli,
        Err(termination) => return finish(termination),
    };

    let termination = match run(&cli).await {
        Ok(output) => Termination::Output(output),
        Err(error) => Termination::Failure(error.to_string()),
    };
    finish(termination)
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(cli: &ConnectBotCli) -> Result<String> {
    let working_dir = std::env::current_dir().context("unable to resolve the working directory")?;
    let services: Vec<ConnectedService> = connect::run_connect(cli, &working_dir, tokio::io::stdin()).await?;
    serde_json::to_string_pretty(&services).context("unable to serialize connected services")
}

fn finish(termination: Termination) -> ExitCode {
    match &termination {
        Termination::Output(text) => println!("{}", text),
        Termination::Failure(message) => {
            let colored = std::io::stderr().is_terminal();
            eprintln!("{}", report::error_report(message, colored));
        }
    }
    ExitCode::from(termination.exit_status())
}
