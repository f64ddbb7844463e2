use bisnode_client::prelude::*;
use std::env;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    let country = env::args().nth(1).unwrap_or_else(|| "EST".to_string());
    let name = env::args().nth(2).unwrap_or_else(|| "Bisnode".to_string());

    let mut client = SoapClient::new(Config::new());
    if client.token().is_none() {
        warn!("BISNODE_SOAP_TOKEN is not set, the service will reject the search");
    }

    for function in client.functions() {
        info!("available: {}", function);
    }

    let found = client.search_company(&country, &name).await?.as_json()?;
    info!("Search for {} in {}: {}", name, country, found);
    Ok(())
}
