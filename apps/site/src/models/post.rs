use serde::{Deserialize, Serialize};

/// A blog post as stored in the posts table. `slug` is the partition key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// List projection of a post; never carries the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl From<BlogPost> for PostSummary {
    fn from(post: BlogPost) -> Self {
        PostSummary {
            slug: post.slug,
            title: post.title,
            excerpt: post.excerpt,
            tags: post.tags.unwrap_or_default(),
            published_at: post.published_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published_at: Option<String>,
}

/// Every mutable field of a post, written wholesale on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub tags: Vec<String>,
    pub published_at: String,
    pub updated_at: String,
}

impl PostUpdate {
    pub fn into_post(self, slug: String) -> BlogPost {
        BlogPost {
            slug,
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            tags: Some(self.tags),
            published_at: Some(self.published_at),
            updated_at: Some(self.updated_at),
        }
    }
}

/// Response body for `PUT /api/posts/:slug`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedPost {
    pub slug: String,
    #[serde(flatten)]
    pub fields: PostUpdate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    pub content: Option<String>,
}

/// Post metadata proposed by the language model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedFields {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub tags: Vec<String>,
}

/// Lenient decode of the model's reply; validation happens in `posts::fields`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGeneratedFields {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<serde_json::Value>>,
}
