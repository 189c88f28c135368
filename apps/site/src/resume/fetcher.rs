//! GitHub contents API client for the private resume repository.

use base64::Engine as _;
use reqwest::{header, Client};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ResumeRepo;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch {path}: {status}")]
    Status { path: String, status: u16 },

    #[error("Failed to download {path}: {status}")]
    Download { path: String, status: u16 },

    #[error("No content available for {path}.")]
    NoContent { path: String },

    #[error("RESUME_REPO_TOKEN is not a valid header value")]
    InvalidToken,

    #[error("Invalid base64 content for {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: base64::DecodeError,
    },
}

/// The subset of `GET /repos/{owner}/{repo}/contents/{path}` we read.
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: Option<String>,
    encoding: Option<String>,
    download_url: Option<String>,
}

pub struct GithubClient {
    client: Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(token: &str, base_url: impl Into<String>) -> Result<Self, FetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            "x-github-api-version",
            header::HeaderValue::from_static(GITHUB_API_VERSION),
        );
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| FetchError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let client = Client::builder()
            .user_agent(concat!("site-fetch-resume/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn contents_url(&self, repo: &ResumeRepo, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url.trim_end_matches('/'),
            repo.owner,
            repo.repo,
            path.trim_start_matches('/')
        )
    }

    /// Fetches a file's raw bytes, preferring inline base64 content and falling back
    /// to `download_url` (GitHub omits inline content for large files).
    pub async fn fetch_bytes(&self, repo: &ResumeRepo, path: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.contents_url(repo, path);
        debug!("GET {url}?ref={}", repo.git_ref);

        let response = self
            .client
            .get(&url)
            .query(&[("ref", repo.git_ref.as_str())])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: response.status().as_u16(),
            });
        }
        let file: ContentsResponse = response.json().await?;

        if let (Some(content), Some("base64")) = (file.content.as_deref(), file.encoding.as_deref())
        {
            if !content.is_empty() {
                return decode_base64(path, content);
            }
        }

        if let Some(download_url) = file.download_url.as_deref() {
            info!("Downloading {path} via download_url");
            let response = self.client.get(download_url).send().await?;
            if !response.status().is_success() {
                return Err(FetchError::Download {
                    path: path.to_string(),
                    status: response.status().as_u16(),
                });
            }
            return Ok(response.bytes().await?.to_vec());
        }

        Err(FetchError::NoContent {
            path: path.to_string(),
        })
    }

    pub async fn fetch_text(&self, repo: &ResumeRepo, path: &str) -> Result<String, FetchError> {
        let bytes = self.fetch_bytes(repo, path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// GitHub wraps base64 payloads at 60 columns; whitespace is dropped before decoding.
fn decode_base64(path: &str, content: &str) -> Result<Vec<u8>, FetchError> {
    let cleaned: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    base64::engine::general_purpose::STANDARD
        .decode(cleaned)
        .map_err(|source| FetchError::Decode {
            path: path.to_string(),
            source,
        })
}
