//! End-to-end tests against a mock PermID service
//!
//! Exercises the whole stack (client -> service -> gateway -> reqwest
//! transport) over real HTTP with wiremock: header and parameter
//! placement, response reshaping, error classification, and quota
//! bookkeeping.

use permid::{
    EntityType, LookupOptions, MatchDataType, MatchOptions, PermIdClient, PermIdError,
    SearchQuery, Table, TagOptions,
};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOOKUP_BODY: &str = r#"{
    "@context": "https://permid.org/context.jsonld",
    "hasPermId": "4298009661",
    "name": "Example Corp"
}"#;

fn client_for(server: &MockServer) -> PermIdClient {
    let base = server.uri();
    PermIdClient::builder()
        .access_token("test-token")
        .lookup_url(format!("{base}/"))
        .search_url(format!("{base}/search"))
        .match_url(format!("{base}/match"))
        .match_file_url(format!("{base}/match/file"))
        .tag_url(format!("{base}/calais"))
        .build()
        .unwrap()
}

#[tokio::test]
async fn lookup_dataframe_reshapes_the_entity_and_records_quota() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/4298009661"))
        .and(query_param("format", "json-ld"))
        .and(query_param("access-token", "test-token"))
        .and(header("Accept", "application/ld+json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/ld+json")
                .insert_header("x-permid-quota-daily", "5000")
                .insert_header("x-permid-quota-used", "1")
                .insert_header("date", "Tue, 04 Aug 2026 10:00:00 GMT")
                .set_body_string(LOOKUP_BODY),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let output = client.lookup("4298009661", LookupOptions::default()).await.unwrap();

    let table = output.as_table().unwrap();
    assert_eq!(table.len(), 1);
    assert!(!table.columns().contains(&"@context".to_string()));
    assert_eq!(table.get(0, "name"), Some(&json!("Example Corp")));

    let usage = client.usage();
    assert_eq!(usage.len(), 1);
    assert_eq!(usage.get(0, "Time"), Some(&json!("Tue, 04 Aug 2026 10:00:00 GMT")));
    assert_eq!(usage.get(0, "Quota Daily"), Some(&json!("5000")));
    assert_eq!(usage.get(0, "Quota Used"), Some(&json!("1")));
}

#[tokio::test]
async fn search_specific_type_builds_a_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "IBM"))
        .and(query_param("entityType", "organization"))
        .and(query_param("format", "json"))
        .and(query_param("num", "5"))
        .and(query_param("order", "rel"))
        .and(query_param("start", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(
                    r#"{"result":{"organizations":{"entities":[{"id":"1"},{"id":"2"}]}}}"#,
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = SearchQuery::new("IBM").with_entity_type(EntityType::Organization);
    let output = client.search(query).await.unwrap();

    let table = output.as_table().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.columns(), ["id"]);
}

#[tokio::test]
async fn search_all_returns_one_table_per_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(
                    r#"{
                        "result": {
                            "organizations": {"entities": [{"id": "1"}]},
                            "quotes": {"entities": [{"ric": "IBM.N"}, {"ric": "IBM.L"}]}
                        }
                    }"#,
                ),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let output = client.search(SearchQuery::new("IBM")).await.unwrap();

    let categories = output.as_categories().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories["organizations"].len(), 1);
    assert_eq!(categories["quotes"].len(), 2);

    // entityType=all stays out of the query string entirely.
    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].url.query_pairs().any(|(name, _)| name == "entityType"));
}

#[tokio::test]
async fn match_round_trips_tabular_input() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/match"))
        .and(header("Content-Type", "text/plain"))
        .and(header("Accept", "application/json"))
        .and(header("x-openmatch-numberOfMatchesPerRecord", "2"))
        .and(header("x-openmatch-dataType", "Organization"))
        .and(header("x-ag-access-token", "test-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(
                    r#"{"outputContentResponse":[
                        {"Input_Name": "Acme", "Match OpenPermID": "1"},
                        {"Input_Name": "Globex", "Match OpenPermID": "2"}
                    ]}"#,
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let input = Table::from_records(&[
        [("Name".to_string(), json!("Acme"))].into_iter().collect(),
        [("Name".to_string(), json!("Globex"))].into_iter().collect(),
    ]);

    let client = client_for(&server);
    let options = MatchOptions::default()
        .with_data_type(MatchDataType::Organization)
        .with_matches_per_record(2);
    let output = client.match_records(input.clone(), &options).await.unwrap();

    let table = output.as_table().unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.columns().contains(&"Match OpenPermID".to_string()));

    // The body the service saw parses back into the input's shape.
    let requests = server.received_requests().await.unwrap();
    let sent = String::from_utf8_lossy(&requests[0].body).into_owned();
    let echoed = Table::from_delimited(&sent).unwrap();
    assert_eq!(echoed.columns(), input.columns());
    assert_eq!(echoed.len(), input.len());
}

#[tokio::test]
async fn match_file_uploads_multipart_under_the_file_field() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("records.csv");
    std::fs::write(&file_path, "Name\nAcme\n").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/match/file"))
        .and(header("x-openmatch-dataType", "Person"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(r#"{"outputContentResponse":[{"Input_Name":"Acme"}]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = MatchOptions::default().with_data_type(MatchDataType::Person);
    let output = client.match_file(&file_path, &options).await.unwrap();
    assert_eq!(output.as_table().unwrap().len(), 1);

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("Acme"));
}

#[tokio::test]
async fn tag_returns_the_raw_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/calais"))
        .and(header("x-calais-language", "English"))
        .and(header("outputFormat", "application/json"))
        .and(header("Content-Type", "text/raw"))
        .and(body_string("Example Corp builds gadgets."))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(r#"{"doc":{"info":{}}}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let output = client.tag("Example Corp builds gadgets.", &TagOptions::default()).await.unwrap();
    assert_eq!(output, r#"{"doc":{"info":{}}}"#);
}

#[tokio::test]
async fn server_errors_surface_reason_and_truncated_body() {
    let server = MockServer::start().await;
    let long_body = format!("Internal error details...{}", "x".repeat(300));
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("content-type", "text/plain")
                .set_body_string(long_body),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.lookup("4298009661", LookupOptions::default()).await.unwrap_err();

    match err {
        PermIdError::Application { reason, body } => {
            assert_eq!(reason, "Internal Server Error");
            assert!(body.starts_with("Internal error details..."));
            assert_eq!(body.chars().count(), 200);
        }
        other => panic!("expected an application error, got {other:?}"),
    }

    // Failed calls leave the ledger untouched.
    let usage = client.usage();
    assert_eq!(usage.len(), 1);
    assert_eq!(usage.get(0, "Time"), Some(&json!("None")));
}

#[tokio::test]
async fn html_answers_surface_as_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>No such record</body></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.lookup("0000000000", LookupOptions::default()).await.unwrap_err();
    assert!(matches!(err, PermIdError::NotFound(_)));
}

#[tokio::test]
async fn validation_failures_never_reach_the_network() {
    let server = MockServer::start().await;

    let client = client_for(&server);
    let options = MatchOptions::default();

    let err = client.match_records("", &options).await.unwrap_err();
    assert!(matches!(err, PermIdError::Validation(_)));

    let err = client
        .match_records("Name\nAcme", &options.clone().with_matches_per_record(9))
        .await
        .unwrap_err();
    assert!(matches!(err, PermIdError::Validation(_)));

    let err = client.match_file("/nonexistent/path.csv", &options).await.unwrap_err();
    match err {
        PermIdError::Validation(message) => assert!(message.contains("doesn't exist")),
        other => panic!("expected a validation error, got {other:?}"),
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn quota_ledger_grows_once_per_successful_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .insert_header("x-permid-quota-used", "7")
                .set_body_string(r#"{"result":{"organizations":{"entities":[]}}}"#),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = SearchQuery::new("IBM").with_entity_type(EntityType::Organization);
    client.search(query.clone()).await.unwrap();
    client.search(query).await.unwrap();

    assert_eq!(client.usage().len(), 2);
}
