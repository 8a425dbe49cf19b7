//! # CLI Argument Definitions

use clap::{Parser, Subcommand};

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "folio-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Send a message through a Folio contact form")]
pub struct Cli {
    /// API root, e.g. https://example.com/api
    /// [default: $FOLIO_BACKEND_URL, then $FOLIO_API_URL, then http://localhost:10000/api]
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Log retry diagnostics to the console
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Submit an inquiry, retrying while the backend wakes up
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// Check that the backend is up
    Health {},
}
