//! Normalisation of post payloads and generated post metadata.

use thiserror::Error;

use crate::models::post::{
    BlogPost, CreatePostRequest, GeneratedFields, PostUpdate, RawGeneratedFields,
    UpdatePostRequest,
};
use crate::models::scalar_text;

pub const MAX_EXCERPT_CHARS: usize = 200;
pub const MAX_TAGS: usize = 7;
pub const MAX_SLUG_LEN: usize = 80;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PostInputError {
    #[error("Invalid post payload: '{0}' is required")]
    MissingField(&'static str),

    #[error("Invalid generated fields: '{0}' is empty")]
    EmptyGenerated(&'static str),
}

/// Lower-cases, turns every run of characters outside `[a-z0-9]` into one hyphen,
/// strips leading and trailing hyphens and caps the result at 80 characters.
pub fn slugify(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug.chars().take(MAX_SLUG_LEN).collect()
}

/// Trims each tag and drops the empty ones.
pub fn normalize_tags(tags: Option<&[String]>) -> Vec<String> {
    tags.unwrap_or_default()
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

fn required(field: &'static str, value: Option<String>) -> Result<String, PostInputError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(PostInputError::MissingField(field))
}

/// Builds the record for a new post. `now` stamps `updatedAt` and a missing
/// `publishedAt`; an empty tag list is stored as no tags at all.
pub fn normalize_post_input(
    input: CreatePostRequest,
    now: &str,
) -> Result<BlogPost, PostInputError> {
    let tags = normalize_tags(input.tags.as_deref());

    Ok(BlogPost {
        slug: required("slug", input.slug)?,
        title: required("title", input.title)?,
        excerpt: required("excerpt", input.excerpt)?,
        content: required("content", input.content)?,
        tags: (!tags.is_empty()).then_some(tags),
        published_at: Some(input.published_at.unwrap_or_else(|| now.to_string())),
        updated_at: Some(now.to_string()),
    })
}

/// Full replacement for an existing post. Omitted fields become empty, not the
/// previously stored value.
pub fn build_post_update(payload: UpdatePostRequest, now: &str) -> PostUpdate {
    let text = |v: Option<String>| v.map(|s| s.trim().to_string()).unwrap_or_default();

    PostUpdate {
        tags: normalize_tags(payload.tags.as_deref()),
        title: text(payload.title),
        excerpt: text(payload.excerpt),
        content: text(payload.content),
        published_at: payload.published_at.unwrap_or_else(|| now.to_string()),
        updated_at: now.to_string(),
    }
}

/// Validates model-proposed metadata. The slug falls back to the title and is always
/// re-slugified; the excerpt and tag list are clipped.
pub fn normalize_generated_fields(
    raw: RawGeneratedFields,
) -> Result<GeneratedFields, PostInputError> {
    let title = raw.title.unwrap_or_default().trim().to_string();
    let excerpt = raw.excerpt.unwrap_or_default().trim().to_string();
    let tags: Vec<String> = raw
        .tags
        .unwrap_or_default()
        .iter()
        .map(|tag| scalar_text(tag).trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();
    let slug = slugify(raw.slug.as_deref().unwrap_or(&title));

    if title.is_empty() {
        return Err(PostInputError::EmptyGenerated("title"));
    }
    if excerpt.is_empty() {
        return Err(PostInputError::EmptyGenerated("excerpt"));
    }
    if slug.is_empty() {
        return Err(PostInputError::EmptyGenerated("slug"));
    }
    if tags.is_empty() {
        return Err(PostInputError::EmptyGenerated("tags"));
    }

    Ok(GeneratedFields {
        title,
        excerpt: excerpt.chars().take(MAX_EXCERPT_CHARS).collect(),
        tags: tags.into_iter().take(MAX_TAGS).collect(),
        slug,
    })
}

/// Fills only the blank fields of an admin form with generated values.
pub fn merge_generated_fields(form: BlogPost, generated: &GeneratedFields) -> BlogPost {
    let keep_or = |current: String, fallback: &str| {
        if current.trim().is_empty() {
            fallback.to_string()
        } else {
            current
        }
    };

    BlogPost {
        slug: keep_or(form.slug, &generated.slug),
        title: keep_or(form.title, &generated.title),
        excerpt: keep_or(form.excerpt, &generated.excerpt),
        tags: match form.tags {
            Some(tags) if !tags.is_empty() => Some(tags),
            _ => Some(generated.tags.clone()),
        },
        ..form
    }
}
