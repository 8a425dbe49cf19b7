use anyhow::Context;
use folio::kernel::config::load_config;
use folio_logger::Logger;
use folio_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;

    let cfg = load_config(Some("folio")).context("Critical: Configuration is malformed")?;

    Server::builder().config(cfg).build().await?.run().await
}
