//! End-to-end runs of the resume pipeline against mocked GitHub and LLM endpoints.

mod common;

use std::path::Path;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use site::config::{PipelineConfig, ResumeRepo};
use site::llm_client::LlmClient;
use site::resume::fetcher::GithubClient;
use site::resume::fingerprint::fingerprint;
use site::resume::pipeline::{self, SummaryOutcome};
use site::resume::profile_sync::ProfileSync;
use site::resume::summarizer::{LlmSummarizer, Summarizer};

const README: &str = "# Jane Doe\nStaff Engineer\n";
const README_B64: &str = "IyBKYW5lIERvZQpTdGFmZiBFbmdpbmVlcgo=";
const PDF_B64: &str = "JVBERi0xLjQgZmFrZQ==";

fn config(root: &Path, server: &MockServer) -> PipelineConfig {
    PipelineConfig {
        root: root.to_path_buf(),
        repo: ResumeRepo {
            owner: "jane".into(),
            repo: "resume".into(),
            readme_path: "README.md".into(),
            pdf_path: "resume.pdf".into(),
            git_ref: "main".into(),
        },
        github_token: "test-token".into(),
        github_api_url: server.uri(),
        openai_api_key: Some("sk-test".into()),
        openai_model: "gpt-4o-mini".into(),
        openai_base_url: server.uri(),
    }
}

async fn mount_github(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/repos/jane/resume/contents/README.md"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": README_B64,
            "encoding": "base64"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/jane/resume/contents/resume.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": PDF_B64,
            "encoding": "base64"
        })))
        .mount(server)
        .await;
}

fn summarizer(config: &PipelineConfig) -> LlmSummarizer {
    LlmSummarizer::new(
        LlmClient::new("sk-test", config.openai_base_url.clone()).unwrap(),
        config.openai_model.clone(),
    )
}

#[tokio::test]
async fn cache_hit_skips_the_model() {
    let server = MockServer::start().await;
    mount_github(&server).await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(common::chat_reply(&common::summary_json()))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), &server);
    std::fs::create_dir_all(config.summary_path().parent().unwrap()).unwrap();
    let cached = json!({ "readmeHash": fingerprint(README), "title": "Cached" }).to_string();
    std::fs::write(config.summary_path(), &cached).unwrap();

    let github = GithubClient::new(&config.github_token, config.github_api_url.clone()).unwrap();
    let summarizer = summarizer(&config);
    let report = pipeline::run(&config, &github, Some(&summarizer as &dyn Summarizer))
        .await
        .unwrap();

    assert_eq!(report.summary, SummaryOutcome::UpToDate);
    assert_eq!(std::fs::read_to_string(config.markdown_path()).unwrap(), README);
    assert_eq!(std::fs::read(config.pdf_path()).unwrap(), b"%PDF-1.4 fake");
    assert_eq!(std::fs::read_to_string(config.summary_path()).unwrap(), cached);
}

#[tokio::test]
async fn cache_hit_needs_no_api_key() {
    let server = MockServer::start().await;
    mount_github(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), &server);
    std::fs::create_dir_all(config.summary_path().parent().unwrap()).unwrap();
    std::fs::write(
        config.summary_path(),
        json!({ "readmeHash": fingerprint(README) }).to_string(),
    )
    .unwrap();

    let github = GithubClient::new(&config.github_token, config.github_api_url.clone()).unwrap();
    let report = pipeline::run(&config, &github, None).await.unwrap();

    assert_eq!(report.summary, SummaryOutcome::UpToDate);
}

#[tokio::test]
async fn changed_readme_regenerates_and_syncs_profile() {
    let server = MockServer::start().await;
    mount_github(&server).await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(common::chat_reply(&common::summary_json()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), &server);
    std::fs::create_dir_all(config.summary_path().parent().unwrap()).unwrap();
    std::fs::write(config.summary_path(), r#"{"readmeHash":"stale"}"#).unwrap();
    std::fs::create_dir_all(config.profile_path().parent().unwrap()).unwrap();
    std::fs::write(
        config.profile_path(),
        r#"{"name":"Jane","title":"Old","tagline":"Old tagline","githubUrl":"https://github.com/jane"}"#,
    )
    .unwrap();

    let github = GithubClient::new(&config.github_token, config.github_api_url.clone()).unwrap();
    let summarizer = summarizer(&config);
    let report = pipeline::run(&config, &github, Some(&summarizer as &dyn Summarizer))
        .await
        .unwrap();

    assert_eq!(
        report.summary,
        SummaryOutcome::Generated {
            profile: ProfileSync::Updated
        }
    );

    let raw = std::fs::read_to_string(config.summary_path()).unwrap();
    assert!(raw.ends_with("}\n"));
    let artifact: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(artifact["readmeHash"], fingerprint(README));
    assert_eq!(artifact["model"], "gpt-4o-mini");
    assert!(artifact["generatedAt"].as_str().unwrap().ends_with('Z'));
    assert_eq!(artifact["title"], "Staff Platform Engineer");
    assert_eq!(artifact["featured"].as_array().unwrap().len(), 5);

    let profile: Value =
        serde_json::from_str(&std::fs::read_to_string(config.profile_path()).unwrap()).unwrap();
    assert_eq!(profile["name"], "Jane");
    assert_eq!(profile["title"], "Staff Platform Engineer");
    assert_eq!(profile["tagline"], "Builds calm, reliable infrastructure.");
}

#[tokio::test]
async fn stale_cache_without_api_key_fails_after_writing_assets() {
    let server = MockServer::start().await;
    mount_github(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), &server);

    let github = GithubClient::new(&config.github_token, config.github_api_url.clone()).unwrap();
    let err = pipeline::run(&config, &github, None).await.unwrap_err();

    assert!(format!("{err:#}").contains("OPENAI_API_KEY"));
    assert!(config.markdown_path().exists());
    assert!(config.pdf_path().exists());
    assert!(!config.summary_path().exists());
}

#[tokio::test]
async fn invalid_summary_leaves_previous_artifact() {
    let server = MockServer::start().await;
    mount_github(&server).await;

    let mut payload = common::summary_json();
    payload["values"] = json!([]);
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(common::chat_reply(&payload))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), &server);
    std::fs::create_dir_all(config.summary_path().parent().unwrap()).unwrap();
    std::fs::write(config.summary_path(), r#"{"readmeHash":"stale"}"#).unwrap();

    let github = GithubClient::new(&config.github_token, config.github_api_url.clone()).unwrap();
    let summarizer = summarizer(&config);
    let err = pipeline::run(&config, &github, Some(&summarizer as &dyn Summarizer))
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("values"));
    assert_eq!(
        std::fs::read_to_string(config.summary_path()).unwrap(),
        r#"{"readmeHash":"stale"}"#
    );
}
