#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod args;
pub mod commands;

use crate::args::{Cli, Commands};
use anyhow::Result;
use clap::Parser;
use folio::features::contact::NewInquiry;
use folio::features::contact::client::ContactClient;
use folio_logger::{LevelFilter, Logger};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::ERROR };
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).init()?;

    let endpoint = commands::resolve_endpoint(cli.endpoint, |var| std::env::var(var).ok());
    let client = ContactClient::builder().base_url(endpoint).build()?;

    match cli.command {
        Commands::Submit { name, email, phone, subject, message } => {
            let mut inquiry = NewInquiry::new(name, email, subject, message);
            if let Some(phone) = phone {
                inquiry = inquiry.with_phone(phone);
            }
            commands::submit(&client, inquiry).await
        },
        Commands::Health {} => commands::health(&client).await,
    }
}
