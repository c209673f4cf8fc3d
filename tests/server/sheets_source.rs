use bookdash::domain::SourceError;
use bookdash::domain::source::RecordSource;
use bookdash::infrastructure::sheets::{GoogleSheetsSource, SheetsConfig};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{
    TEST_API_KEY, error_response, sample_rows, sheets_config, values_mock, values_response,
};

#[tokio::test]
async fn fetch_maps_rows_to_records() {
    let mock_server = MockServer::start().await;
    values_mock()
        .respond_with(values_response(sample_rows()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = GoogleSheetsSource::new(sheets_config(&mock_server, Some(TEST_API_KEY))).unwrap();
    let records = source.fetch().await.unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].order_date, "2024-01-05");
    assert_eq!(records[0].title, "Kitchen");
    assert_eq!(records[0].read_flag, 1);
    assert_eq!(records[0].rating, Some(5));
    assert_eq!(records[0].price_yen, "1,000");
    assert_eq!(records[1].rating, None);
    assert_eq!(records[2].category, "Nonfiction");
}

#[tokio::test]
async fn fetch_requests_encoded_range() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/test-sheet/values/Log%202024!A2:G"))
        .respond_with(values_response(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = SheetsConfig {
        range: "Log 2024!A2:G".to_string(),
        ..sheets_config(&mock_server, Some(TEST_API_KEY))
    };
    let records = GoogleSheetsSource::new(config)
        .unwrap()
        .fetch()
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn fetch_classifies_invalid_key() {
    let mock_server = MockServer::start().await;
    values_mock()
        .respond_with(error_response(
            400,
            "INVALID_ARGUMENT",
            "API key not valid. Please pass a valid API key.",
        ))
        .mount(&mock_server)
        .await;

    let source = GoogleSheetsSource::new(sheets_config(&mock_server, Some(TEST_API_KEY))).unwrap();
    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, SourceError::InvalidApiKey(_)), "{err:?}");
}

#[tokio::test]
async fn fetch_reports_server_failure() {
    let mock_server = MockServer::start().await;
    values_mock()
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&mock_server)
        .await;

    let source = GoogleSheetsSource::new(sheets_config(&mock_server, Some(TEST_API_KEY))).unwrap();
    match source.fetch().await.unwrap_err() {
        SourceError::Api { status, message } => {
            assert!(status.starts_with("503"), "{status}");
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_without_values_is_no_data() {
    let mock_server = MockServer::start().await;
    values_mock()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Sheet1!A2:G1000",
            "majorDimension": "ROWS"
        })))
        .mount(&mock_server)
        .await;

    let source = GoogleSheetsSource::new(sheets_config(&mock_server, Some(TEST_API_KEY))).unwrap();
    assert!(matches!(source.fetch().await, Err(SourceError::NoData)));
}

#[tokio::test]
async fn fetch_unreachable_is_transport_error() {
    // Reserve a port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let source = GoogleSheetsSource::new(SheetsConfig {
        base_url: format!("http://{address}"),
        api_key: Some(TEST_API_KEY.to_string()),
        ..SheetsConfig::default()
    })
    .unwrap();
    assert!(matches!(
        source.fetch().await,
        Err(SourceError::Transport(_))
    ));
}
