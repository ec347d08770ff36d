use clap::Parser;
use std::io;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod controller;
mod domain;
mod error;
mod services;

use cli::Cli;
use commands::{gather_credentials, handle_tag_command, TagPlan};
use controller::client::{ApiClient, ClientOptions};
use services::credentials::{authenticate, Terminal};
use services::diagnostics::write_error;

fn default_filter(sdkdebug: u8) -> &'static str {
    match sdkdebug {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn init_logging(sdkdebug: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(sdkdebug)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // kind and patterns are checked before any login attempt
    let plan = TagPlan::from_cli(&cli)?;

    let conn = &cli.connection;
    let mut client = ApiClient::new(&ClientOptions {
        controller: conn.controller.clone(),
        insecure: conn.insecure,
        ignore_region: conn.noregion,
        timeout: Duration::from_secs(conn.timeout),
    })?;
    let credentials = gather_credentials(conn)?;
    authenticate(&mut client, credentials, &mut Terminal)?;
    tracing::info!(
        controller = client.base_url(),
        tenant = client.tenant_id().unwrap_or_default(),
        "session ready"
    );

    handle_tag_command(&client, &plan)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.connection.sdkdebug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = write_error(&mut io::stderr().lock(), &err);
            ExitCode::FAILURE
        }
    }
}
