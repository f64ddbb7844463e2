use bisnode_client::error::AppError;
use bisnode_client::model::requests::{
    ApiMode, DocType, RestEndpoint, RestRequest, SoapOperation, SoapRequest,
};
use std::str::FromStr;

#[test]
fn api_mode_parses_and_displays() {
    assert_eq!(ApiMode::from_str("xml").unwrap(), ApiMode::Xml);
    assert_eq!(ApiMode::from_str("Json").unwrap(), ApiMode::Json);
    assert_eq!(ApiMode::Json.to_string(), "json");
    assert_eq!(ApiMode::default(), ApiMode::Xml);
    assert!(matches!(
        ApiMode::from_str("yaml"),
        Err(AppError::InvalidInput(_))
    ));
}

#[test]
fn api_mode_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ApiMode::Json).unwrap(), "\"json\"");
    let mode: ApiMode = serde_json::from_str("\"xml\"").unwrap();
    assert_eq!(mode, ApiMode::Xml);
}

#[test]
fn rest_endpoint_paths() {
    let paths: Vec<&str> = RestEndpoint::ALL.iter().map(|e| e.path()).collect();
    assert_eq!(
        paths,
        vec![
            "listcompanieszipped",
            "shortreport",
            "kmkrData",
            "taxArrears",
            "arListDocs",
            "arListReports"
        ]
    );
    assert!(RestEndpoint::ListCompaniesZipped.is_compressed());
    assert!(!RestEndpoint::ShortReport.is_compressed());
}

#[test]
fn rest_request_by_reg_code_sends_id() {
    let request = RestRequest::by_reg_code("12345678");
    assert_eq!(request.form, vec![("id", "12345678".to_string())]);
    assert!(RestRequest::empty().is_empty());
}

#[test]
fn soap_operation_parameter_sets() {
    assert_eq!(SoapOperation::GetProfile.params(), &["email", "pass"]);
    assert!(!SoapOperation::GetProfileFinland.requires_token());
    assert_eq!(
        SoapOperation::SearchCompany.params(),
        &["token", "country", "name"]
    );
    assert_eq!(
        SoapOperation::GetAnnualReport.params(),
        &["token", "country", "reg_code", "doc_type", "annual_year"]
    );
    assert!(SoapOperation::GetAaaRating.requires_token());
    assert_eq!(
        SoapOperation::GetTaxArrears.signature(),
        "getTaxArrears(token, country, reg_code)"
    );
}

#[test]
fn soap_operation_round_trips_through_name() {
    for op in SoapOperation::ALL {
        assert_eq!(SoapOperation::from_str(op.name()).unwrap(), op);
    }
    assert!(SoapOperation::from_str("getEverything").is_err());
}

#[test]
fn doc_type_codes() {
    assert_eq!(DocType::Xbrl.code(), "X");
    assert_eq!(DocType::Pdf.code(), "A");
    assert_eq!(DocType::DigiDoc.code(), "D");
    assert_eq!(DocType::from_str("a").unwrap(), DocType::Pdf);
    assert!(DocType::from_str("Z").is_err());
}

#[test]
fn soap_request_keeps_param_order() {
    let request = SoapRequest::new(SoapOperation::GetCreditReport)
        .with_param("token", "T")
        .with_param("country", "EST")
        .with_param("reg_code", "10000001");
    let names: Vec<&str> = request.params.iter().map(|(k, _)| *k).collect();
    assert_eq!(names, SoapOperation::GetCreditReport.params());
    assert_eq!(request.param("country"), Some("EST"));
    assert_eq!(request.param("name"), None);
}

#[test]
fn soap_request_description_omits_values() {
    let request = SoapRequest::new(SoapOperation::GetProfile)
        .with_param("email", "mari@example.ee")
        .with_param("pass", "secret");
    let description = request.describe();
    assert_eq!(description, "getProfile(email, pass)");
    assert!(!description.contains("secret"));
}
