//! Resume summary schema.
//!
//! The model's reply is decoded leniently into [`RawSummary`] and then converted with
//! `TryFrom` into a [`ResumeSummary`]. Conversion either yields a fully valid record or
//! names the first field that failed; callers never see a partially valid summary.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::models::scalar_text;

/// Inclusive cardinality bounds for a list field. Longer lists are clipped to `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListBounds {
    pub min: usize,
    pub max: usize,
}

pub const FEATURED: ListBounds = ListBounds { min: 5, max: 5 };
pub const CORE_COMPETENCIES: ListBounds = ListBounds { min: 4, max: 8 };
pub const VALUES: ListBounds = ListBounds { min: 3, max: 6 };
pub const HIGHLIGHTS: ListBounds = ListBounds { min: 3, max: 8 };
pub const LEADERSHIP_SKILLS: ListBounds = ListBounds { min: 3, max: 10 };
pub const TECHNICAL_SKILLS: ListBounds = ListBounds { min: 3, max: 12 };

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryError {
    #[error("summary field '{0}' is missing or empty")]
    MissingField(&'static str),

    #[error("summary field '{field}' has {found} usable items; at least {min} required")]
    TooFewItems {
        field: &'static str,
        found: usize,
        min: usize,
    },
}

/// Whatever the model returned, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSummary {
    pub title: Option<Value>,
    pub tagline: Option<Value>,
    pub summary: Option<Value>,
    pub what_i_do: Option<Value>,
    pub featured: Option<Value>,
    pub core_competencies: Option<Value>,
    pub values: Option<Value>,
    pub highlights: Option<Value>,
    pub skills: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    pub leadership: Vec<String>,
    pub technical: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub title: String,
    pub tagline: String,
    pub summary: String,
    pub what_i_do: String,
    pub featured: Vec<String>,
    pub core_competencies: Vec<String>,
    pub values: Vec<String>,
    pub highlights: Vec<String>,
    pub skills: Skills,
}

impl TryFrom<RawSummary> for ResumeSummary {
    type Error = SummaryError;

    fn try_from(raw: RawSummary) -> Result<Self, Self::Error> {
        let skills = raw.skills.unwrap_or(Value::Null);

        Ok(ResumeSummary {
            title: required_text("title", raw.title.as_ref(), false)?,
            tagline: required_text("tagline", raw.tagline.as_ref(), false)?,
            summary: required_text("summary", raw.summary.as_ref(), true)?,
            what_i_do: required_text("whatIDo", raw.what_i_do.as_ref(), true)?,
            featured: bounded_list("featured", raw.featured.as_ref(), FEATURED)?,
            core_competencies: bounded_list(
                "coreCompetencies",
                raw.core_competencies.as_ref(),
                CORE_COMPETENCIES,
            )?,
            values: bounded_list("values", raw.values.as_ref(), VALUES)?,
            highlights: bounded_list("highlights", raw.highlights.as_ref(), HIGHLIGHTS)?,
            skills: Skills {
                leadership: bounded_list(
                    "skills.leadership",
                    skills.get("leadership"),
                    LEADERSHIP_SKILLS,
                )?,
                technical: bounded_list(
                    "skills.technical",
                    skills.get("technical"),
                    TECHNICAL_SKILLS,
                )?,
            },
        })
    }
}

/// The JSON artifact written next to the site content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryArtifact {
    #[serde(default)]
    pub readme_hash: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub generated_at: String,
    #[serde(flatten)]
    pub summary: ResumeSummary,
}

impl SummaryArtifact {
    /// Reads the artifact back for the site. A missing file yields `None`; so does a
    /// file that does not parse or whose text fields are blank, with a warning.
    pub fn load(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                return None;
            }
        };
        let artifact: SummaryArtifact = match serde_json::from_str(&raw) {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!("Ignoring malformed {}: {e}", path.display());
                return None;
            }
        };

        let summary = &artifact.summary;
        let blank = [
            ("title", &summary.title),
            ("tagline", &summary.tagline),
            ("summary", &summary.summary),
            ("whatIDo", &summary.what_i_do),
        ]
        .into_iter()
        .find(|(_, text)| text.trim().is_empty());
        if let Some((field, _)) = blank {
            warn!("Ignoring {}: '{field}' is empty", path.display());
            return None;
        }
        Some(artifact)
    }
}

/// Replaces every whitespace run that contains a line break with a single space.
fn collapse_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = String::new();
    for c in text.chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        flush_run(&mut out, &mut run);
        out.push(c);
    }
    flush_run(&mut out, &mut run);
    out
}

fn flush_run(out: &mut String, run: &mut String) {
    if run.contains('\n') {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}

fn required_text(
    field: &'static str,
    value: Option<&Value>,
    single_line: bool,
) -> Result<String, SummaryError> {
    let text = value.map(scalar_text).unwrap_or_default();
    let text = if single_line {
        collapse_line_breaks(&text)
    } else {
        text
    };
    let text = text.trim();
    if text.is_empty() {
        return Err(SummaryError::MissingField(field));
    }
    Ok(text.to_string())
}

/// Trims items, drops blanks, rejects below `bounds.min`, clips to `bounds.max`.
fn bounded_list(
    field: &'static str,
    value: Option<&Value>,
    bounds: ListBounds,
) -> Result<Vec<String>, SummaryError> {
    let items: Vec<String> = match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| scalar_text(item).trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        _ => Vec::new(),
    };

    if items.len() < bounds.min {
        return Err(SummaryError::TooFewItems {
            field,
            found: items.len(),
            min: bounds.min,
        });
    }
    Ok(items.into_iter().take(bounds.max).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_payload() -> Value {
        json!({
            "title": "  Staff Engineer ",
            "tagline": "Builds reliable platforms.",
            "summary": "Engineer with\n   a decade of experience.",
            "whatIDo": "I lead teams.\nI ship systems.",
            "featured": ["a", "b", "c", "d", "e"],
            "coreCompetencies": ["x", "y", "z", "w"],
            "values": ["ownership", "clarity", "care"],
            "highlights": ["1", "2", "3"],
            "skills": {
                "leadership": ["mentoring", "hiring", "planning"],
                "technical": ["rust", "aws", "sql"]
            }
        })
    }

    fn decode(value: Value) -> Result<ResumeSummary, SummaryError> {
        let raw: RawSummary = serde_json::from_value(value).unwrap();
        ResumeSummary::try_from(raw)
    }

    #[test]
    fn test_valid_payload_normalizes_text() {
        let summary = decode(valid_payload()).unwrap();
        assert_eq!(summary.title, "Staff Engineer");
        assert_eq!(summary.summary, "Engineer with a decade of experience.");
        assert_eq!(summary.what_i_do, "I lead teams. I ship systems.");
        assert_eq!(summary.skills.technical, vec!["rust", "aws", "sql"]);
    }

    #[test]
    fn test_collapse_keeps_inline_spacing() {
        assert_eq!(collapse_line_breaks("a  b \n c"), "a  b c");
    }

    #[test]
    fn test_three_featured_items_rejected() {
        let mut payload = valid_payload();
        payload["featured"] = json!(["a", "b", "c"]);
        assert_eq!(
            decode(payload).unwrap_err(),
            SummaryError::TooFewItems {
                field: "featured",
                found: 3,
                min: 5
            }
        );
    }

    #[test]
    fn test_blank_items_do_not_count_toward_minimum() {
        let mut payload = valid_payload();
        payload["values"] = json!(["ownership", "  ", "", "care"]);
        assert!(matches!(
            decode(payload),
            Err(SummaryError::TooFewItems { field: "values", found: 2, .. })
        ));
    }

    #[test]
    fn test_long_lists_are_clipped() {
        let mut payload = valid_payload();
        payload["featured"] = json!(["1", "2", "3", "4", "5", "6", "7"]);
        payload["coreCompetencies"] = json!(["a", "b", "c", "d", "e", "f", "g", "h", "i"]);
        let summary = decode(payload).unwrap();
        assert_eq!(summary.featured.len(), 5);
        assert_eq!(summary.core_competencies.len(), 8);
    }

    #[test]
    fn test_missing_nested_skills_rejected() {
        let mut payload = valid_payload();
        payload["skills"] = json!({ "leadership": ["a", "b", "c"] });
        assert!(matches!(
            decode(payload),
            Err(SummaryError::TooFewItems { field: "skills.technical", .. })
        ));
    }

    #[test]
    fn test_whitespace_title_rejected() {
        let mut payload = valid_payload();
        payload["tagline"] = json!(" \n ");
        assert_eq!(
            decode(payload).unwrap_err(),
            SummaryError::MissingField("tagline")
        );
    }

    #[test]
    fn test_non_array_list_rejected() {
        let mut payload = valid_payload();
        payload["highlights"] = json!("one, two, three");
        assert!(decode(payload).is_err());
    }

    #[test]
    fn test_artifact_flattens_summary_with_camel_case_keys() {
        let artifact = SummaryArtifact {
            readme_hash: "abc".into(),
            model: "gpt-4o-mini".into(),
            generated_at: "2024-01-01T00:00:00.000Z".into(),
            summary: decode(valid_payload()).unwrap(),
        };
        let json = serde_json::to_value(&artifact).unwrap();
        assert_eq!(json["readmeHash"], "abc");
        assert_eq!(json["whatIDo"], "I lead teams. I ship systems.");
        assert_eq!(json["coreCompetencies"][0], "x");
        assert_eq!(json["skills"]["leadership"][1], "hiring");
    }

    #[test]
    fn test_load_reads_written_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("personalization.json");
        let artifact = SummaryArtifact {
            readme_hash: "abc".into(),
            model: "gpt-4o".into(),
            generated_at: "2024-01-01T00:00:00.000Z".into(),
            summary: decode(valid_payload()).unwrap(),
        };
        std::fs::write(&path, serde_json::to_string_pretty(&artifact).unwrap()).unwrap();

        assert_eq!(SummaryArtifact::load(&path), Some(artifact));
    }

    #[test]
    fn test_load_tolerates_missing_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("personalization.json");
        let mut payload = valid_payload();
        payload["title"] = json!("Staff Engineer");
        std::fs::write(&path, payload.to_string()).unwrap();

        let artifact = SummaryArtifact::load(&path).unwrap();
        assert!(artifact.readme_hash.is_empty());
        assert_eq!(artifact.summary.title, "Staff Engineer");
    }

    #[test]
    fn test_load_rejects_malformed_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("personalization.json");
        assert_eq!(SummaryArtifact::load(&path), None);

        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(SummaryArtifact::load(&path), None);

        let mut payload = valid_payload();
        payload["featured"] = json!(["a", 2]);
        std::fs::write(&path, payload.to_string()).unwrap();
        assert_eq!(SummaryArtifact::load(&path), None);

        let mut payload = valid_payload();
        payload["whatIDo"] = json!("   ");
        std::fs::write(&path, payload.to_string()).unwrap();
        assert_eq!(SummaryArtifact::load(&path), None);
    }
}
