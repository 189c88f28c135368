use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::warn;

use crate::models::profile::{Profile, ResumeRepoConfig};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_BLOG_TABLE: &str = "personal-website-blog-posts";
pub const DEFAULT_REF: &str = "main";

/// Model used for on-demand post metadata generation.
pub const DEFAULT_POST_MODEL: &str = "gpt-4o-mini";
/// Resume summarisation model for local runs.
pub const LOCAL_SUMMARY_MODEL: &str = "gpt-4o-mini";
/// Resume summarisation model for CI builds.
pub const CI_SUMMARY_MODEL: &str = "gpt-4o";

const MARKDOWN_ARTIFACT: &str = "web/src/content/resume.md";
const PDF_ARTIFACT: &str = "web/public/resume.pdf";
const SUMMARY_ARTIFACT: &str = "web/src/content/personalization.json";
const PROFILE_FILE: &str = "config/profile.json";

/// Which `PostStore` backend the API server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    DynamoDb,
    Memory,
}

/// API server configuration loaded from environment variables.
/// Returns an error at startup if a value is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret for admin routes. `None` leaves admin routes open (local development).
    pub admin_token: Option<String>,
    pub blog_table_name: String,
    pub aws_region: String,
    pub dynamodb_endpoint: Option<String>,
    pub store_backend: StoreBackend,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub site_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| non_empty(lookup(key));

        let store_backend = match get("BLOG_STORE").as_deref() {
            None | Some("dynamodb") => StoreBackend::DynamoDb,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("BLOG_STORE must be 'dynamodb' or 'memory', got '{other}'"),
        };

        Ok(Config {
            admin_token: get("ADMIN_TOKEN"),
            blog_table_name: get("BLOG_TABLE_NAME").unwrap_or_else(|| DEFAULT_BLOG_TABLE.into()),
            aws_region: get("AWS_REGION").unwrap_or_else(|| "us-east-1".into()),
            dynamodb_endpoint: get("DYNAMODB_ENDPOINT"),
            store_backend,
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_POST_MODEL.into()),
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into()),
            site_url: get("NEXT_PUBLIC_SITE_URL")
                .unwrap_or_else(|| "http://localhost:3000".into()),
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Coordinates of the resume files inside the source repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeRepo {
    pub owner: String,
    pub repo: String,
    pub readme_path: String,
    pub pdf_path: String,
    pub git_ref: String,
}

/// Configuration for the `fetch-resume` build step.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub root: PathBuf,
    pub repo: ResumeRepo,
    pub github_token: String,
    pub github_api_url: String,
    /// Only required when the summary has to be regenerated.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
}

impl PipelineConfig {
    pub fn from_env(root: PathBuf, model_override: Option<String>) -> Result<Self> {
        Self::from_lookup(root, model_override, |key| std::env::var(key).ok())
    }

    /// Repository coordinates come from `RESUME_REPO_*`, falling back to the
    /// `resumeRepo` block of `config/profile.json`.
    pub fn from_lookup(
        root: PathBuf,
        model_override: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let get = |key: &str| non_empty(lookup(key));

        let fallback = read_profile_repo(&root.join(PROFILE_FILE)).unwrap_or_default();

        let owner = get("RESUME_REPO_OWNER").or_else(|| non_empty(Some(fallback.owner.clone())));
        let repo = get("RESUME_REPO_NAME").or_else(|| non_empty(Some(fallback.repo.clone())));
        let readme_path = get("RESUME_REPO_README_PATH")
            .or_else(|| non_empty(Some(fallback.readme_path.clone())));
        let pdf_path =
            get("RESUME_REPO_PDF_PATH").or_else(|| non_empty(Some(fallback.pdf_path.clone())));
        let git_ref = get("RESUME_REPO_REF")
            .or_else(|| non_empty(fallback.git_ref.clone()))
            .unwrap_or_else(|| DEFAULT_REF.to_string());

        let (Some(owner), Some(repo), Some(readme_path), Some(pdf_path)) =
            (owner, repo, readme_path, pdf_path)
        else {
            bail!("Resume repo config is incomplete. Set RESUME_REPO_* in .env or your environment.");
        };

        let github_token = get("RESUME_REPO_TOKEN")
            .context("Required environment variable 'RESUME_REPO_TOKEN' is not set")?;

        let is_ci = is_true(lookup("CI")) || is_true(lookup("GITHUB_ACTIONS"));
        let openai_model = select_model(model_override.or_else(|| get("OPENAI_MODEL")), is_ci);

        Ok(PipelineConfig {
            root,
            repo: ResumeRepo {
                owner,
                repo,
                readme_path,
                pdf_path,
                git_ref,
            },
            github_token,
            github_api_url: get("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_GITHUB_API_URL.into()),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model,
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into()),
        })
    }

    pub fn markdown_path(&self) -> PathBuf {
        self.root.join(MARKDOWN_ARTIFACT)
    }

    pub fn pdf_path(&self) -> PathBuf {
        self.root.join(PDF_ARTIFACT)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.root.join(SUMMARY_ARTIFACT)
    }

    pub fn profile_path(&self) -> PathBuf {
        self.root.join(PROFILE_FILE)
    }
}

/// An explicit override always wins; otherwise CI builds get the more capable model.
pub fn select_model(model_override: Option<String>, is_ci: bool) -> String {
    match model_override {
        Some(model) => model,
        None if is_ci => CI_SUMMARY_MODEL.to_string(),
        None => LOCAL_SUMMARY_MODEL.to_string(),
    }
}

fn read_profile_repo(path: &Path) -> Option<ResumeRepoConfig> {
    if !path.exists() {
        return None;
    }
    match Profile::read(path) {
        Ok(profile) => profile.resume_repo,
        Err(e) => {
            warn!("Ignoring unreadable profile at {}: {e:#}", path.display());
            None
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_true(value: Option<String>) -> bool {
    value.as_deref() == Some("true")
}
