use std::fs;
use std::path::Path;

use chrono::Local;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub mod api;
pub mod config;
pub mod errors;
pub mod functions;
pub mod parsing;
pub mod report;
pub mod structs;
pub mod utils;

#[cfg(test)]
mod tests;

use config::FundConfig;
use errors::RunError;
use functions::{movements, reconcile};
use structs::SnapshotManager;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = config::data_dir();
    let client = reqwest::Client::new();

    // One fund failing must not stop the others.
    for fund in config::watched_funds() {
        if let Err(error) = run_fund(&client, &data_dir, &fund).await {
            error!("{}: run aborted, snapshot left untouched: {}", fund.tag, error);
        }
    }
}

/* One fund's full cycle: fetch, diff against the stored snapshot,
write the report, then persist today's holdings as tomorrow's baseline.
Strictly sequential; the snapshot is only overwritten after everything
else succeeded. */
async fn run_fund(
    client: &reqwest::Client,
    data_dir: &Path,
    fund: &FundConfig,
) -> Result<(), RunError> {
    info!("{}: fetching holdings for {}", fund.tag, fund.name);
    let current = api::fetch_holdings(client, fund).await?;
    info!("{}: fetched {} holdings", fund.tag, current.len());

    let manager = SnapshotManager::new(data_dir, fund.tag);
    let previous = manager.load_previous();
    if previous.is_none() {
        info!("{}: no prior snapshot, treating everything as new", fund.tag);
    }

    let changes = reconcile(&current, previous.as_ref());
    let moved = movements(&changes).len();

    let html = report::render(fund.name, &current, &changes, Local::now());
    let report_path = data_dir.join(format!("{}.html", fund.tag));
    fs::write(&report_path, html)?;

    manager.store_current(&current)?;
    info!(
        "{}: {} movement(s), report written to {}",
        fund.tag,
        moved,
        report_path.display()
    );
    Ok(())
}
