use bisnode_client::application::client::RestClient;
use bisnode_client::application::config::Config;
use bisnode_client::application::interfaces::ResponseFormat;
use bisnode_client::error::AppError;
use bisnode_client::model::requests::ApiMode;
use flate2::Compression;
use flate2::write::GzEncoder;
use mockito::{Matcher, Server};
use reqwest::StatusCode;
use std::io::Write;

const FORM: &str = "application/x-www-form-urlencoded";

fn create_client(server: &Server, mode: ApiMode) -> RestClient {
    RestClient::new(Config::for_base_url(&server.url(), "KEY", mode))
}

#[tokio::test]
async fn test_short_report_json_posts_id_and_keeps_body() {
    let mut server = Server::new_async().await;
    let body = r#"{"id":"12345678","name":"Example AS","status":"R"}"#;
    let mock = server
        .mock("POST", "/KEY/shortreport.json")
        .match_header("content-type", FORM)
        .match_body("id=12345678")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(1)
        .create_async()
        .await;

    let mut client = create_client(&server, ApiMode::Json);
    let raw = client
        .get_short_report("12345678")
        .await
        .unwrap()
        .as_raw()
        .to_string();

    mock.assert_async().await;
    assert_eq!(raw, body);
    assert_eq!(client.to_string(), body);
    assert_eq!(client.as_json().unwrap(), body);
    assert_eq!(client.as_map().unwrap()["name"], "Example AS");
}

#[tokio::test]
async fn test_each_endpoint_issues_one_request() {
    let mut server = Server::new_async().await;
    let mut mocks = Vec::new();
    for path in ["kmkrData", "taxArrears", "arListDocs", "arListReports"] {
        mocks.push(
            server
                .mock("POST", format!("/KEY/{path}.xml").as_str())
                .match_body("id=10000001")
                .with_body(format!("<{path}><ok>1</ok></{path}>"))
                .expect(1)
                .create_async()
                .await,
        );
    }

    let mut client = create_client(&server, ApiMode::Xml);
    client.get_kmkr_data("10000001").await.unwrap();
    assert_eq!(client.as_raw(), "<kmkrData><ok>1</ok></kmkrData>");
    client.get_tax_arrears("10000001").await.unwrap();
    assert_eq!(client.as_raw(), "<taxArrears><ok>1</ok></taxArrears>");
    client.get_ar_list_docs("10000001").await.unwrap();
    client.get_ar_list_reports("10000001").await.unwrap();
    assert_eq!(client.as_json().unwrap(), r#"{"ok":"1"}"#);

    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_switching_mode_changes_extension_and_decoder() {
    let mut server = Server::new_async().await;
    let xml_mock = server
        .mock("POST", "/KEY/taxArrears.xml")
        .with_body("<taxArrears><amount>10.5</amount><details/></taxArrears>")
        .create_async()
        .await;
    let json_mock = server
        .mock("POST", "/KEY/taxArrears.json")
        .with_body(r#"{"amount":10.5,"details":{}}"#)
        .create_async()
        .await;

    let mut client = create_client(&server, ApiMode::Xml);
    let xml_json = client.get_tax_arrears("1").await.unwrap().as_json().unwrap();
    assert_eq!(xml_json, r#"{"amount":"10.5","details":null}"#);
    assert!(client.as_xml().is_ok());

    client.set_mode(ApiMode::Json);
    // the stored body keeps the decoder it was requested with
    assert_eq!(client.as_json().unwrap(), xml_json);

    let json_json = client.get_tax_arrears("1").await.unwrap().as_json().unwrap();
    assert_eq!(json_json, r#"{"amount":10.5,"details":null}"#);
    assert!(client.as_xml().is_err());

    xml_mock.assert_async().await;
    json_mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_object_response_is_null() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/KEY/shortreport.json")
        .with_body("{}")
        .create_async()
        .await;

    let mut client = create_client(&server, ApiMode::Json);
    let json = client.get_short_report("1").await.unwrap().as_json().unwrap();
    assert_eq!(json, "null");
}

#[tokio::test]
async fn test_list_of_companies_is_inflated() {
    let document = "<companies><company><reg_code>10000001</reg_code></company></companies>";
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(document.as_bytes()).unwrap();
    let payload = encoder.finish().unwrap();

    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/KEY/listcompanieszipped.xml")
        .match_body("")
        .with_body(payload)
        .create_async()
        .await;

    let mut client = create_client(&server, ApiMode::Xml);
    let value = client
        .get_list_of_companies()
        .await
        .unwrap()
        .as_value()
        .unwrap();

    mock.assert_async().await;
    assert_eq!(client.as_raw(), document);
    assert_eq!(value["company"]["reg_code"], "10000001");
}

#[tokio::test]
async fn test_non_success_status_is_unexpected_and_body_kept() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/KEY/shortreport.xml")
        .with_status(403)
        .with_body("<error>invalid api key</error>")
        .create_async()
        .await;

    let mut client = create_client(&server, ApiMode::Xml);
    match client.get_short_report("1").await {
        Err(AppError::Unexpected(status)) => assert_eq!(status, StatusCode::FORBIDDEN),
        Err(e) => panic!("Expected Unexpected error, got {e:?}"),
        Ok(_) => panic!("Expected Unexpected error"),
    }
    assert_eq!(client.as_raw(), "<error>invalid api key</error>");
}

#[tokio::test]
async fn test_missing_api_key_sends_nothing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut client = RestClient::new(Config::for_base_url(&server.url(), "", ApiMode::Xml));
    let result = client.get_short_report("1").await;

    assert!(matches!(result, Err(AppError::InvalidInput(_))));
    assert_eq!(client.as_raw(), "");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transport_failure_is_network_error() {
    // nothing listens on the discard port
    let mut client = RestClient::new(Config::for_base_url(
        "http://127.0.0.1:9",
        "KEY",
        ApiMode::Xml,
    ));
    let result = client.get_short_report("1").await;
    assert!(matches!(result, Err(AppError::Network(_))));
    assert!(matches!(client.as_json(), Err(AppError::EmptyResponse)));
}
