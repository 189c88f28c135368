//! Pulls the resume from its source repository and refreshes the generated summary.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use site::config::PipelineConfig;
use site::llm_client::LlmClient;
use site::models::profile::Profile;
use site::resume::fetcher::GithubClient;
use site::resume::pipeline::{self, SummaryOutcome};
use site::resume::summarizer::{LlmSummarizer, Summarizer};
use site::resume::summary::SummaryArtifact;

#[derive(Debug, Parser)]
#[command(name = "fetch-resume", version, about)]
struct Cli {
    /// Repository root; artifacts are written beneath it.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Summarisation model (defaults to a CI- or local-specific model).
    #[arg(long, env = "OPENAI_MODEL")]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // load .env if present; existing variables win
    let cli = Cli::parse();
    site::logging::init(env!("CARGO_CRATE_NAME"), "info");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = PipelineConfig::from_env(cli.root, cli.model)?;
    info!(
        "Fetching resume from {}/{}@{}",
        config.repo.owner, config.repo.repo, config.repo.git_ref
    );

    let github = GithubClient::new(&config.github_token, config.github_api_url.clone())?;
    let summarizer = match &config.openai_api_key {
        Some(key) => Some(LlmSummarizer::new(
            LlmClient::new(key.clone(), config.openai_base_url.clone())?,
            config.openai_model.clone(),
        )),
        None => None,
    };

    let report = pipeline::run(
        &config,
        &github,
        summarizer.as_ref().map(|s| s as &dyn Summarizer),
    )
    .await?;

    if report.summary == SummaryOutcome::UpToDate
        && SummaryArtifact::load(&report.summary_path).is_none()
    {
        warn!(
            "Cached summary at {} is unusable; delete it to force regeneration",
            report.summary_path.display()
        );
    }

    if let SummaryOutcome::Generated { .. } = report.summary {
        info!("Summary regenerated for README {}", report.readme_hash);
        let profile_path = config.profile_path();
        if profile_path.exists() {
            match Profile::load(&profile_path) {
                Ok(profile) => info!("Profile now reads: {} | {}", profile.title, profile.tagline),
                Err(e) => warn!("{e:#}"),
            }
        }
    }
    Ok(())
}
