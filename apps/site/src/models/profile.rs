use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Site owner profile stored in `config/profile.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub tagline: String,
    #[serde(default)]
    pub linkedin_url: String,
    #[serde(default)]
    pub github_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_repo: Option<ResumeRepoConfig>,
}

/// Where the resume lives in its source repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRepoConfig {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub readme_path: String,
    #[serde(default)]
    pub pdf_path: String,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
}

impl Profile {
    pub fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    /// Reads the profile and applies `PROFILE_*` environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    pub fn load_with(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut profile = Self::read(path)?;
        let overrides = [
            ("PROFILE_NAME", &mut profile.name),
            ("PROFILE_TITLE", &mut profile.title),
            ("PROFILE_TAGLINE", &mut profile.tagline),
            ("PROFILE_LINKEDIN_URL", &mut profile.linkedin_url),
            ("PROFILE_GITHUB_URL", &mut profile.github_url),
        ];
        for (key, field) in overrides {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *field = value.trim().to_string();
            }
        }
        Ok(profile)
    }
}
