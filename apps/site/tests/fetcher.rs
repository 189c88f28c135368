//! `GithubClient` against a local `wiremock` server standing in for the contents API.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use site::config::ResumeRepo;
use site::resume::fetcher::{FetchError, GithubClient};

fn repo() -> ResumeRepo {
    ResumeRepo {
        owner: "jane".into(),
        repo: "resume".into(),
        readme_path: "README.md".into(),
        pdf_path: "resume.pdf".into(),
        git_ref: "main".into(),
    }
}

#[tokio::test]
async fn fetch_text_decodes_wrapped_base64_content() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/jane/resume/contents/README.md"))
        .and(query_param("ref", "main"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("x-github-api-version", "2022-11-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": "IyBKYW5lIERvZQpTdGFm\nZiBFbmdpbmVlcgo=\n",
            "encoding": "base64",
            "download_url": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GithubClient::new("test-token", server.uri()).unwrap();
    let text = client.fetch_text(&repo(), "README.md").await.unwrap();

    assert_eq!(text, "# Jane Doe\nStaff Engineer\n");
}

#[tokio::test]
async fn fetch_bytes_falls_back_to_download_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/jane/resume/contents/resume.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": "",
            "encoding": "none",
            "download_url": format!("{}/raw/resume.pdf", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/raw/resume.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 fake".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let client = GithubClient::new("test-token", server.uri()).unwrap();
    let bytes = client.fetch_bytes(&repo(), "resume.pdf").await.unwrap();

    assert_eq!(bytes, b"%PDF-1.4 fake");
}

#[tokio::test]
async fn non_success_contents_response_names_path_and_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/jane/resume/contents/README.md"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = GithubClient::new("test-token", server.uri()).unwrap();
    let err = client.fetch_text(&repo(), "README.md").await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert_eq!(err.to_string(), "Failed to fetch README.md: 404");
}

#[tokio::test]
async fn failed_download_reports_download_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/jane/resume/contents/resume.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "download_url": format!("{}/raw/resume.pdf", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/raw/resume.pdf"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = GithubClient::new("test-token", server.uri()).unwrap();
    let err = client.fetch_bytes(&repo(), "resume.pdf").await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to download resume.pdf: 500");
}

#[tokio::test]
async fn response_without_content_or_download_url_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/jane/resume/contents/README.md"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "type": "dir" })))
        .mount(&server)
        .await;

    let client = GithubClient::new("test-token", server.uri()).unwrap();
    let err = client.fetch_text(&repo(), "README.md").await.unwrap_err();

    assert_eq!(err.to_string(), "No content available for README.md.");
}
