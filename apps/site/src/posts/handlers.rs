use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::auth::AdminGuard;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::now_iso;
use crate::models::post::{
    BlogPost, CreatePostRequest, GenerateRequest, GeneratedFields, PostSummary,
    UpdatePostRequest, UpdatedPost,
};
use crate::posts::fields::{build_post_update, normalize_post_input};
use crate::posts::generate::generate_fields;
use crate::state::AppState;

/// Newest first. Posts without `publishedAt` sort last; ties keep scan order.
pub fn sort_newest_first(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| {
        let a = a.published_at.as_deref().unwrap_or("");
        let b = b.published_at.as_deref().unwrap_or("");
        b.cmp(a)
    });
}

/// GET /api/posts
pub async fn handle_list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostSummary>>, AppError> {
    let mut posts = state.store.list().await?;
    sort_newest_first(&mut posts);
    Ok(Json(posts.into_iter().map(PostSummary::from).collect()))
}

/// POST /api/posts
pub async fn handle_create_post(
    _admin: AdminGuard,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<BlogPost>), AppError> {
    let post =
        normalize_post_input(req, &now_iso()).map_err(|e| AppError::Validation(e.to_string()))?;

    state.store.insert_if_absent(&post).await?;
    info!("Created post {}", post.slug);
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/posts/:slug
pub async fn handle_get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, AppError> {
    state
        .store
        .get(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Post {slug} not found")))
}

/// PUT /api/posts/:slug
pub async fn handle_update_post(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ApiJson(req): ApiJson<UpdatePostRequest>,
) -> Result<Json<UpdatedPost>, AppError> {
    let fields = build_post_update(req, &now_iso());

    state.store.overwrite(&slug, &fields).await?;
    info!("Updated post {slug}");
    Ok(Json(UpdatedPost { slug, fields }))
}

/// DELETE /api/posts/:slug
pub async fn handle_delete_post(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete(&slug).await?;
    info!("Deleted post {slug}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/posts/generate
pub async fn handle_generate_fields(
    _admin: AdminGuard,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<GenerateRequest>,
) -> Result<Json<GeneratedFields>, AppError> {
    let content = req.content.as_deref().map(str::trim).unwrap_or_default();
    if content.is_empty() {
        return Err(AppError::Validation("Missing content".into()));
    }
    let llm = state
        .llm
        .as_ref()
        .ok_or_else(|| AppError::Config("Missing OPENAI_API_KEY".into()))?;

    let fields = generate_fields(llm, &state.config.openai_model, content)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;
    Ok(Json(fields))
}
