//! Build-time resume pipeline: fetch, write, fingerprint, summarise, sync.
//!
//! Every step runs strictly in sequence. Artifacts written before a failure stay on
//! disk; nothing is rolled back.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::models::now_iso;
use crate::resume::fetcher::GithubClient;
use crate::resume::fingerprint::{check_cache, fingerprint, CacheDecision};
use crate::resume::profile_sync::{sync_profile, ProfileSync};
use crate::resume::summarizer::Summarizer;
use crate::resume::summary::SummaryArtifact;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// The cached summary already matches the README.
    UpToDate,
    Generated { profile: ProfileSync },
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub readme_hash: String,
    pub markdown_path: PathBuf,
    pub pdf_path: PathBuf,
    pub summary_path: PathBuf,
    pub summary: SummaryOutcome,
}

async fn write_artifact(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("writing {}", path.display()))
}

/// Runs the pipeline once. `summarizer` is only consulted when the README changed, so
/// an up-to-date build needs no LLM credentials.
pub async fn run(
    config: &PipelineConfig,
    github: &GithubClient,
    summarizer: Option<&dyn Summarizer>,
) -> Result<PipelineReport> {
    let repo = &config.repo;

    let readme = github
        .fetch_text(repo, &repo.readme_path)
        .await
        .context("fetching resume README")?;
    let markdown_path = config.markdown_path();
    write_artifact(&markdown_path, readme.as_bytes()).await?;

    let pdf = github
        .fetch_bytes(repo, &repo.pdf_path)
        .await
        .context("fetching resume PDF")?;
    let pdf_path = config.pdf_path();
    write_artifact(&pdf_path, &pdf).await?;

    let readme_hash = fingerprint(&readme);
    let summary_path = config.summary_path();

    let summary = match check_cache(&summary_path, &readme_hash) {
        CacheDecision::UpToDate => {
            info!("Personalization data is up to date; skipping generation.");
            SummaryOutcome::UpToDate
        }
        CacheDecision::Regenerate(reason) => {
            info!("Regenerating personalization data ({reason:?})");
            let Some(summarizer) = summarizer else {
                bail!("Required environment variable 'OPENAI_API_KEY' is not set");
            };

            let summary = summarizer.summarize(&readme).await?;
            let artifact = SummaryArtifact {
                readme_hash: readme_hash.clone(),
                model: summarizer.model().to_string(),
                generated_at: now_iso(),
                summary,
            };
            let mut json = serde_json::to_string_pretty(&artifact)?;
            json.push('\n');
            write_artifact(&summary_path, json.as_bytes()).await?;

            let profile_path = config.profile_path();
            let profile = sync_profile(&profile_path, &artifact.summary);
            match &profile {
                ProfileSync::Updated => info!("Updated {}", profile_path.display()),
                ProfileSync::NotApplicable => {}
                ProfileSync::Failed(e) => {
                    warn!("Failed to update {}: {e}", profile_path.display())
                }
            }

            info!("Wrote personalization summary to {}", summary_path.display());
            SummaryOutcome::Generated { profile }
        }
    };

    info!("Wrote resume markdown to {}", markdown_path.display());
    info!("Wrote resume PDF to {}", pdf_path.display());

    Ok(PipelineReport {
        readme_hash,
        markdown_path,
        pdf_path,
        summary_path,
        summary,
    })
}
