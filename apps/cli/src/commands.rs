use anyhow::{Result, bail};
use folio::features::contact::NewInquiry;
use folio::features::contact::client::{ContactClient, DEFAULT_BASE_URL, SubmitError};

/// Environment variables consulted for the API root, in order.
pub const ENDPOINT_VARS: [&str; 2] = ["FOLIO_BACKEND_URL", "FOLIO_API_URL"];

/// Picks the API root: the flag, then the first non-empty variable, then the default.
pub fn resolve_endpoint(flag: Option<String>, lookup: impl Fn(&str) -> Option<String>) -> String {
    flag.or_else(|| ENDPOINT_VARS.iter().find_map(|var| lookup(var).filter(|v| !v.trim().is_empty())))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
}

pub async fn submit(client: &ContactClient, inquiry: NewInquiry) -> Result<()> {
    let total = client.policy().max_attempts();
    println!("Sending message to {} ...", client.base_url());

    let outcome = client
        .submit_with_progress(&inquiry, |event| {
            println!(
                "Server is waking up, retrying in {:.1}s (attempt {} of {total} failed: {})",
                event.delay.as_secs_f64(),
                event.attempt,
                event.error,
            );
        })
        .await;

    match outcome {
        Ok(receipt) => {
            println!("{}", receipt.message);
            println!("Reference: {}", receipt.contact_id);
            Ok(())
        },
        Err(err) => {
            eprintln!("{err}");
            if let SubmitError::Rejected { errors, .. } = &err {
                for detail in errors {
                    eprintln!("  - {detail}");
                }
            }
            bail!("submission failed after {} attempt(s)", err.attempts())
        },
    }
}

pub async fn health(client: &ContactClient) -> Result<()> {
    let report = client.health().await?;

    println!("{} ({})", report.message.as_deref().unwrap_or("Backend reachable"), report.status);
    if let Some(version) = &report.version {
        println!("version:     {version}");
    }
    if let Some(environment) = &report.environment {
        println!("environment: {environment}");
    }
    if let Some(uptime) = report.uptime {
        println!("uptime:      {uptime}s");
    }
    Ok(())
}
