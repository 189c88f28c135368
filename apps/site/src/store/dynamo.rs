use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue, Client};
use tracing::{debug, info};

use super::{PostStore, StoreError};
use crate::models::post::{BlogPost, PostUpdate};

type Item = HashMap<String, AttributeValue>;

/// Constructs a DynamoDB client for AWS, or for DynamoDB Local when `endpoint` is set.
pub async fn create_client(region: &str, endpoint: Option<&str>) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(region.to_string()));
    if let Some(endpoint) = endpoint {
        info!("Using DynamoDB endpoint override {endpoint}");
        loader = loader.endpoint_url(endpoint);
    }
    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}

/// Posts table keyed by `slug` (string partition key, no sort key).
#[derive(Clone)]
pub struct DynamoPostStore {
    client: Client,
    table: String,
}

impl DynamoPostStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

fn backend<E>(err: E) -> StoreError
where
    E: std::error::Error + 'static,
{
    StoreError::Backend(DisplayErrorContext(err).to_string())
}

fn slug_key(slug: &str) -> AttributeValue {
    AttributeValue::S(slug.to_string())
}

#[async_trait]
impl PostStore for DynamoPostStore {
    async fn list(&self) -> Result<Vec<BlogPost>, StoreError> {
        let mut posts = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let page = self
                .client
                .scan()
                .table_name(&self.table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(backend)?;

            for item in page.items() {
                posts.push(post_from_item(item)?);
            }

            match page.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        debug!("Scanned {} posts from {}", posts.len(), self.table);
        Ok(posts)
    }

    async fn get(&self, slug: &str) -> Result<Option<BlogPost>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key("slug", slug_key(slug))
            .send()
            .await
            .map_err(backend)?;

        output.item().map(post_from_item).transpose()
    }

    async fn insert_if_absent(&self, post: &BlogPost) -> Result<(), StoreError> {
        let result = self
            .client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item_from_post(post)))
            .condition_expression("attribute_not_exists(#slug)")
            .expression_attribute_names("#slug", "slug")
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception()) =>
            {
                Err(StoreError::Conflict(post.slug.clone()))
            }
            Err(err) => Err(backend(err)),
        }
    }

    async fn overwrite(&self, slug: &str, update: &PostUpdate) -> Result<(), StoreError> {
        self.client
            .update_item()
            .table_name(&self.table)
            .key("slug", slug_key(slug))
            .update_expression(
                "SET #title = :title, #excerpt = :excerpt, #content = :content, \
                 #tags = :tags, #publishedAt = :publishedAt, #updatedAt = :updatedAt",
            )
            .expression_attribute_names("#title", "title")
            .expression_attribute_names("#excerpt", "excerpt")
            .expression_attribute_names("#content", "content")
            .expression_attribute_names("#tags", "tags")
            .expression_attribute_names("#publishedAt", "publishedAt")
            .expression_attribute_names("#updatedAt", "updatedAt")
            .expression_attribute_values(":title", AttributeValue::S(update.title.clone()))
            .expression_attribute_values(":excerpt", AttributeValue::S(update.excerpt.clone()))
            .expression_attribute_values(":content", AttributeValue::S(update.content.clone()))
            .expression_attribute_values(":tags", string_list(&update.tags))
            .expression_attribute_values(
                ":publishedAt",
                AttributeValue::S(update.published_at.clone()),
            )
            .expression_attribute_values(
                ":updatedAt",
                AttributeValue::S(update.updated_at.clone()),
            )
            .send()
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn delete(&self, slug: &str) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key("slug", slug_key(slug))
            .send()
            .await
            .map_err(backend)?;
        Ok(())
    }
}

fn string_list(values: &[String]) -> AttributeValue {
    AttributeValue::L(values.iter().cloned().map(AttributeValue::S).collect())
}

pub(crate) fn item_from_post(post: &BlogPost) -> Item {
    let mut item = HashMap::new();
    item.insert("slug".to_string(), AttributeValue::S(post.slug.clone()));
    item.insert("title".to_string(), AttributeValue::S(post.title.clone()));
    item.insert("excerpt".to_string(), AttributeValue::S(post.excerpt.clone()));
    item.insert("content".to_string(), AttributeValue::S(post.content.clone()));
    if let Some(tags) = &post.tags {
        item.insert("tags".to_string(), string_list(tags));
    }
    if let Some(published_at) = &post.published_at {
        item.insert(
            "publishedAt".to_string(),
            AttributeValue::S(published_at.clone()),
        );
    }
    if let Some(updated_at) = &post.updated_at {
        item.insert("updatedAt".to_string(), AttributeValue::S(updated_at.clone()));
    }
    item
}

pub(crate) fn post_from_item(item: &Item) -> Result<BlogPost, StoreError> {
    let slug = optional_string(item, "slug")?
        .ok_or_else(|| StoreError::Malformed("item has no slug".to_string()))?;

    Ok(BlogPost {
        title: optional_string(item, "title")?.unwrap_or_default(),
        excerpt: optional_string(item, "excerpt")?.unwrap_or_default(),
        content: optional_string(item, "content")?.unwrap_or_default(),
        tags: optional_string_list(item, "tags")?,
        published_at: optional_string(item, "publishedAt")?,
        updated_at: optional_string(item, "updatedAt")?,
        slug,
    })
}

fn optional_string(item: &Item, key: &str) -> Result<Option<String>, StoreError> {
    match item.get(key) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::S(s)) => Ok(Some(s.clone())),
        Some(other) => Err(StoreError::Malformed(format!(
            "attribute '{key}' is not a string: {other:?}"
        ))),
    }
}

fn optional_string_list(item: &Item, key: &str) -> Result<Option<Vec<String>>, StoreError> {
    match item.get(key) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::L(values)) => values
            .iter()
            .map(|v| match v {
                AttributeValue::S(s) => Ok(s.clone()),
                other => Err(StoreError::Malformed(format!(
                    "attribute '{key}' holds a non-string entry: {other:?}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        // String sets are accepted for tables written by other tooling.
        Some(AttributeValue::Ss(values)) => Ok(Some(values.clone())),
        Some(other) => Err(StoreError::Malformed(format!(
            "attribute '{key}' is not a list: {other:?}"
        ))),
    }
}
