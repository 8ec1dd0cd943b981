use auxkit_api::types::ParamStyle;
use auxkit_api::{Client, Error, PageQuery, Query};
use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn get_page_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("page_first.json");

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("offset", "0"))
        .and(query_param("pageSize", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let query = PageQuery::default().with_page_size(2);
    let result = client.get_page::<Value, _>("/items", &query).await;
    assert!(result.is_ok());

    let resp = result.unwrap().unwrap();
    assert_eq!(resp.total, 5);
    assert_eq!(resp.len(), 2);
}

#[tokio::test]
async fn get_page_short_style_params() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("page_short.json");

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("o", "1"))
        .and(query_param("s", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let query = PageQuery::default()
        .with_param_style(ParamStyle::Short)
        .with_offset(1)
        .with_page_size(20);
    let resp = client.get_page::<Value, _>("/items", &query).await.unwrap();
    assert_eq!(resp.unwrap().len(), 1);
}

#[tokio::test]
async fn get_page_empty_body_is_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let resp = client
        .get_page::<Value, _>("/items", &PageQuery::default())
        .await
        .unwrap();
    assert!(resp.is_none());
}

#[tokio::test]
async fn get_page_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client
        .get_page::<Value, _>("/items", &PageQuery::default())
        .await;
    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected HttpStatus error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn get_page_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client
        .get_page::<Value, _>("/items", &PageQuery::default())
        .await;
    assert!(matches!(result, Err(Error::ParseFailed(_))));
}

#[test]
fn page_url_rejects_garbage_base() {
    let client = Client::with_base_url("not a url");
    let result = client.page_url("/items", &PageQuery::default());
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}
