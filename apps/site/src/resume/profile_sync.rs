use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::resume::summary::ResumeSummary;

/// Outcome of copying the generated title and tagline into the profile file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSync {
    Updated,
    /// No profile file exists; nothing to do.
    NotApplicable,
    /// The file exists but could not be read, parsed or written.
    Failed(String),
}

/// Overwrites `title` and `tagline` in the profile JSON, leaving every other key
/// (and the key order) intact. Failure is reported, never raised.
pub fn sync_profile(path: &Path, summary: &ResumeSummary) -> ProfileSync {
    if !path.exists() {
        return ProfileSync::NotApplicable;
    }
    match rewrite(path, summary) {
        Ok(()) => ProfileSync::Updated,
        Err(e) => ProfileSync::Failed(format!("{e:#}")),
    }
}

fn rewrite(path: &Path, summary: &ResumeSummary) -> Result<()> {
    let raw = std::fs::read_to_string(path).context("read profile")?;
    let mut profile: Value = serde_json::from_str(&raw).context("parse profile")?;
    let fields = profile
        .as_object_mut()
        .context("profile is not a JSON object")?;

    fields.insert("title".to_string(), Value::String(summary.title.clone()));
    fields.insert("tagline".to_string(), Value::String(summary.tagline.clone()));

    let mut out = serde_json::to_string_pretty(&profile).context("serialize profile")?;
    out.push('\n');
    std::fs::write(path, out).context("write profile")?;
    Ok(())
}
