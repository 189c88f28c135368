use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{PostStore, StoreError};
use crate::models::post::{BlogPost, PostUpdate};

/// In-process store used by tests and by `BLOG_STORE=memory` local runs.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    posts: RwLock<BTreeMap<String, BlogPost>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: impl IntoIterator<Item = BlogPost>) -> Self {
        let posts = posts.into_iter().map(|p| (p.slug.clone(), p)).collect();
        Self {
            posts: RwLock::new(posts),
        }
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn list(&self) -> Result<Vec<BlogPost>, StoreError> {
        Ok(self.posts.read().await.values().cloned().collect())
    }

    async fn get(&self, slug: &str) -> Result<Option<BlogPost>, StoreError> {
        Ok(self.posts.read().await.get(slug).cloned())
    }

    async fn insert_if_absent(&self, post: &BlogPost) -> Result<(), StoreError> {
        let mut posts = self.posts.write().await;
        if posts.contains_key(&post.slug) {
            return Err(StoreError::Conflict(post.slug.clone()));
        }
        posts.insert(post.slug.clone(), post.clone());
        Ok(())
    }

    async fn overwrite(&self, slug: &str, update: &PostUpdate) -> Result<(), StoreError> {
        self.posts
            .write()
            .await
            .insert(slug.to_string(), update.clone().into_post(slug.to_string()));
        Ok(())
    }

    async fn delete(&self, slug: &str) -> Result<(), StoreError> {
        self.posts.write().await.remove(slug);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, title: &str) -> BlogPost {
        BlogPost {
            slug: slug.into(),
            title: title.into(),
            excerpt: "excerpt".into(),
            content: "content".into(),
            tags: None,
            published_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_insert_conflict_keeps_original() {
        let store = MemoryPostStore::new();
        store.insert_if_absent(&post("a", "First")).await.unwrap();
        let err = store.insert_if_absent(&post("a", "Second")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(ref s) if s == "a"));
        assert_eq!(store.get("a").await.unwrap().unwrap().title, "First");
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let store = MemoryPostStore::new();
        store.delete("nope").await.unwrap();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overwrite_upserts() {
        let store = MemoryPostStore::new();
        let update = PostUpdate {
            title: "T".into(),
            excerpt: String::new(),
            content: String::new(),
            tags: vec![],
            published_at: "p".into(),
            updated_at: "u".into(),
        };
        store.overwrite("fresh", &update).await.unwrap();
        let stored = store.get("fresh").await.unwrap().unwrap();
        assert_eq!(stored.title, "T");
        assert_eq!(stored.tags, Some(vec![]));
    }
}
