use super::common;
use bisnode_client::prelude::*;
use tracing::info;

#[tokio::test]
#[ignore]
async fn test_short_report() {
    let mut client = common::create_rest_client();
    let report = client
        .get_short_report(common::KNOWN_REG_CODE)
        .await
        .expect("Failed to get short report")
        .as_map()
        .expect("Short report is not an object");

    assert!(!report.is_empty(), "Short report should not be empty");
    info!("Short report: {:?}", report);
}

#[tokio::test]
#[ignore]
async fn test_tax_arrears_in_both_modes() {
    let mut client = common::create_rest_client();

    client.set_mode(ApiMode::Xml);
    let xml = client
        .get_tax_arrears(common::KNOWN_REG_CODE)
        .await
        .expect("Failed to get tax arrears as xml")
        .as_json()
        .expect("Tax arrears xml did not convert");

    client.set_mode(ApiMode::Json);
    let json = client
        .get_tax_arrears(common::KNOWN_REG_CODE)
        .await
        .expect("Failed to get tax arrears as json")
        .as_json()
        .expect("Tax arrears json did not convert");

    info!("xml: {}", xml);
    info!("json: {}", json);
}

#[tokio::test]
#[ignore]
async fn test_list_of_companies() {
    let mut client = common::create_rest_client();
    let companies = client
        .get_list_of_companies()
        .await
        .expect("Failed to get list of companies");

    assert!(companies.as_xml().is_ok(), "Company list should be xml");
    info!("Company list size: {} bytes", companies.as_raw().len());
}
