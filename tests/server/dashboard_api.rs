use serde_json::json;

use crate::helpers::{
    error_response, get_json, mount_sample_rows, spawn_app, spawn_app_with_key, values_mock,
    values_response,
};

#[tokio::test]
async fn dashboard_aggregates_sheet_rows() {
    let app = spawn_app().await;
    mount_sample_rows(&app).await;

    let (status, body) = get_json(&app.api_url("/dashboard")).await;
    assert_eq!(status, 200);

    assert_eq!(body["summary"]["total_books"], 3);
    assert_eq!(body["summary"]["total_read"], 2);
    assert_eq!(body["summary"]["average_rating"], 4.0);
    assert_eq!(body["summary"]["total_spent"], 3500);
    assert!(body.get("notice").is_none(), "no notice expected: {body}");

    let monthly = body["monthly"].as_array().unwrap();
    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly[0]["month"], "2024-01");
    assert_eq!(monthly[0]["count"], 2);
    assert_eq!(monthly[0]["total_price"], 1500);
    assert_eq!(monthly[0]["read_ratio"], 0.5);
    assert_eq!(monthly[0]["avg_rating"], 5.0);
    assert_eq!(monthly[1]["month"], "2024-02");
    assert_eq!(monthly[1]["read_ratio"], 1.0);

    let categories = body["categories"].as_array().unwrap();
    assert_eq!(
        categories[0],
        json!({"name": "Fiction", "count": 2, "total_price": 1500})
    );
    assert_eq!(
        categories[1],
        json!({"name": "Nonfiction", "count": 1, "total_price": 2000})
    );
}

#[tokio::test]
async fn summary_endpoint() {
    let app = spawn_app().await;
    mount_sample_rows(&app).await;

    let (status, body) = get_json(&app.api_url("/summary")).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["total_books"], 3);
    assert_eq!(body["data"]["total_spent"], 3500);
    assert!(body.get("notice").is_none(), "no notice expected: {body}");
}

#[tokio::test]
async fn categories_endpoint() {
    let app = spawn_app().await;
    mount_sample_rows(&app).await;

    let (status, body) = get_json(&app.api_url("/categories")).await;
    assert_eq!(status, 200);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Fiction", "Nonfiction"]);
}

#[tokio::test]
async fn monthly_order_query() {
    let app = spawn_app().await;
    values_mock()
        .respond_with(values_response(json!([
            ["2024-03-02", "C", "0", "", "", "100", "A"],
            ["2023-12-24", "B", "1", "4", "", "200", "A"],
            ["2024-03-20", "D", "1", "", "", "300", "A"]
        ])))
        .mount(&app.mock_server)
        .await;

    let (_, sorted) = get_json(&app.api_url("/monthly")).await;
    let months: Vec<&str> = sorted["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["month"].as_str().unwrap())
        .collect();
    assert_eq!(months, ["2023-12", "2024-03"]);

    let (_, encounter) = get_json(&app.api_url("/monthly?order=encounter")).await;
    let months: Vec<&str> = encounter["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["month"].as_str().unwrap())
        .collect();
    assert_eq!(months, ["2024-03", "2023-12"]);
}

#[tokio::test]
async fn monthly_rejects_unknown_order() {
    let app = spawn_app().await;
    mount_sample_rows(&app).await;

    let (status, body) = get_json(&app.api_url("/monthly?order=backwards")).await;
    assert_eq!(status, 400);
    assert!(
        body["message"].as_str().unwrap().contains("backwards"),
        "{body}"
    );
}

#[tokio::test]
async fn invalid_key_degrades_to_empty_dashboard() {
    let app = spawn_app().await;
    values_mock()
        .respond_with(error_response(
            400,
            "INVALID_ARGUMENT",
            "API key not valid. Please pass a valid API key.",
        ))
        .mount(&app.mock_server)
        .await;

    let (status, body) = get_json(&app.api_url("/dashboard")).await;
    assert_eq!(status, 200);
    assert_eq!(body["summary"]["total_books"], 0);
    assert!(body["summary"]["average_rating"].is_null());
    assert!(body["summary"]["read_ratio"].is_null());
    assert_eq!(body["monthly"], json!([]));
    assert_eq!(body["categories"], json!([]));
    assert_eq!(body["notice"]["title"], "API key error");
    assert_eq!(body["notice"]["level"], "error");
}

#[tokio::test]
async fn missing_rows_is_informational() {
    let app = spawn_app().await;
    values_mock()
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!({
            "range": "Sheet1!A2:G1000",
            "majorDimension": "ROWS"
        })))
        .mount(&app.mock_server)
        .await;

    let (_, body) = get_json(&app.api_url("/dashboard")).await;
    assert_eq!(body["notice"]["title"], "No data");
    assert_eq!(body["notice"]["level"], "info");
}

#[tokio::test]
async fn missing_key_never_calls_sheets() {
    let app = spawn_app_with_key(None).await;
    wiremock::Mock::given(wiremock::matchers::any())
        .respond_with(values_response(json!([])))
        .expect(0)
        .mount(&app.mock_server)
        .await;

    let (status, body) = get_json(&app.api_url("/summary")).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["total_books"], 0);
    assert!(body["data"]["average_rating"].is_null());
    assert_eq!(body["notice"]["title"], "API key error");
}

#[tokio::test]
async fn stat_endpoints_report_fetch_failures() {
    let app = spawn_app().await;
    values_mock()
        .respond_with(error_response(
            403,
            "PERMISSION_DENIED",
            "The caller does not have permission",
        ))
        .mount(&app.mock_server)
        .await;

    for path in ["/summary", "/monthly", "/monthly?order=encounter", "/categories"] {
        let (status, body) = get_json(&app.api_url(path)).await;
        assert_eq!(status, 200, "{path}");
        assert_eq!(body["notice"]["title"], "API error", "{path}: {body}");
        assert_eq!(body["notice"]["level"], "error", "{path}");
        assert_eq!(
            body["notice"]["description"], "The caller does not have permission",
            "{path}"
        );
    }

    let (_, monthly) = get_json(&app.api_url("/monthly")).await;
    assert_eq!(monthly["data"], json!([]));
    let (_, categories) = get_json(&app.api_url("/categories")).await;
    assert_eq!(categories["data"], json!([]));
}

#[tokio::test]
async fn empty_sheet_has_no_notice() {
    let app = spawn_app().await;
    values_mock()
        .respond_with(values_response(json!([])))
        .mount(&app.mock_server)
        .await;

    for path in ["/summary", "/monthly", "/categories"] {
        let (status, body) = get_json(&app.api_url(path)).await;
        assert_eq!(status, 200, "{path}");
        assert!(body.get("notice").is_none(), "{path}: {body}");
    }
}

#[tokio::test]
async fn every_request_refetches() {
    let app = spawn_app().await;
    values_mock()
        .respond_with(values_response(crate::helpers::sample_rows()))
        .expect(2)
        .mount(&app.mock_server)
        .await;

    let (_, first) = get_json(&app.api_url("/summary")).await;
    let (_, second) = get_json(&app.api_url("/summary")).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn undated_rows_are_reported() {
    let app = spawn_app().await;
    values_mock()
        .respond_with(values_response(json!([
            ["2024-01-05", "A", "1", "5", "", "1,000", "Fiction"],
            ["unknown", "B", "0", "", "", "500", "Fiction"]
        ])))
        .mount(&app.mock_server)
        .await;

    let (_, body) = get_json(&app.api_url("/dashboard")).await;
    assert_eq!(body["undated_records"], 1);
    assert_eq!(body["summary"]["total_books"], 2);
    assert_eq!(body["monthly"][0]["count"], 1);
    assert_eq!(body["categories"][0]["count"], 2);
}
