use bisnode_client::prelude::*;
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    let reg_code = env::args().nth(1).unwrap_or_else(|| "10137319".to_string());
    info!("Fetching short report for {}", reg_code);

    let mut client = RestClient::new(Config::new());
    let report = client.get_short_report(&reg_code).await?.as_value()?;

    info!("Short report:\n{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
