use postal_http::{FetchSettings, HttpClient, HttpError, PageSource};
use reqwest::{StatusCode, Url};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(retries: usize) -> HttpClient {
    HttpClient::new(FetchSettings {
        retries,
        user_agent: "postal-test/1.0".into(),
        ..Default::default()
    })
    .expect("client builds")
}

fn url(server: &MockServer, p: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), p)).unwrap()
}

#[tokio::test]
async fn ok_response_returns_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/terms"))
        .and(header("user-agent", "postal-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>hello</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let body = client(0).get_page(&url(&server, "/terms")).await.unwrap();
    assert_eq!(body, b"<p>hello</p>");
}

#[tokio::test]
async fn not_found_is_a_status_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(3)
        .get_page(&url(&server, "/missing"))
        .await
        .unwrap_err();
    match err {
        HttpError::Status { status, url } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(url.ends_with("/missing"), "{url}");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn other_success_codes_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let err = client(0).get_page(&url(&server, "/empty")).await.unwrap_err();
    assert!(matches!(
        err,
        HttpError::Status {
            status: StatusCode::NO_CONTENT,
            ..
        }
    ));
}

#[tokio::test]
async fn server_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .expect(1)
        .mount(&server)
        .await;

    let body = client(2).get_page(&url(&server, "/flaky")).await.unwrap();
    assert_eq!(body, b"recovered");
}

#[tokio::test]
async fn retries_are_bounded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let err = client(1).get_page(&url(&server, "/down")).await.unwrap_err();
    assert!(matches!(
        err,
        HttpError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            ..
        }
    ));
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let target = Url::parse(&format!("http://127.0.0.1:{port}/gone")).unwrap();

    let err = client(0).fetch(&target).await.unwrap_err();
    assert!(matches!(err, HttpError::Network(_)), "{err:?}");
}

#[tokio::test]
async fn malformed_url_is_rejected_before_sending() {
    let err = client(0).get_page_str("not a url").await.unwrap_err();
    assert!(matches!(err, HttpError::Url(_)));
}
