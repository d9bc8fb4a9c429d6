//! Blog use cases.
//!
//! Category, tag and text lookups only see published posts and compare
//! case-insensitively.

use super::admin::AdminGate;
use folio_core::content::{BlogPost, BlogPostFields, LIKES_FIELD, VIEWS_FIELD};
use folio_core::error::{FolioError, Result};
use folio_core::repository::Repository;
use folio_core::stats::{self, BlogStats};
use folio_core::store::{Filter, Query};
use std::sync::Arc;

pub struct BlogUseCase {
    repository: Arc<dyn Repository<BlogPost>>,
    gate: AdminGate,
}

impl BlogUseCase {
    pub fn new(repository: Arc<dyn Repository<BlogPost>>, gate: AdminGate) -> Self {
        Self { repository, gate }
    }

    /// Every post including drafts, newest first.
    pub async fn list(&self) -> Result<Vec<BlogPost>> {
        self.repository.list_all().await
    }

    pub async fn published(&self) -> Result<Vec<BlogPost>> {
        self.repository
            .list(Query::new().filter(Filter::eq("published", true)))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Option<BlogPost>> {
        self.repository.find_by_id(id).await
    }

    pub async fn by_category(&self, category: &str) -> Result<Vec<BlogPost>> {
        let wanted = category.trim().to_lowercase();
        Ok(self
            .published()
            .await?
            .into_iter()
            .filter(|p| p.fields.category.to_lowercase() == wanted)
            .collect())
    }

    pub async fn by_tag(&self, tag: &str) -> Result<Vec<BlogPost>> {
        let wanted = tag.trim().to_lowercase();
        Ok(self
            .published()
            .await?
            .into_iter()
            .filter(|p| p.fields.tags.iter().any(|t| t.to_lowercase() == wanted))
            .collect())
    }

    /// Published posts whose title, excerpt, content or tags contain `term`.
    pub async fn search(&self, term: &str) -> Result<Vec<BlogPost>> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .published()
            .await?
            .into_iter()
            .filter(|p| matches_term(&p.fields, &needle))
            .collect())
    }

    pub async fn stats(&self) -> Result<BlogStats> {
        Ok(stats::blog_stats(&self.list().await?))
    }

    pub async fn increment_views(&self, id: &str) -> Result<()> {
        self.repository.increment(id, VIEWS_FIELD, 1).await
    }

    pub async fn increment_likes(&self, id: &str) -> Result<()> {
        self.repository.increment(id, LIKES_FIELD, 1).await
    }

    pub async fn create(&self, fields: BlogPostFields) -> Result<BlogPost> {
        self.gate.require_admin().await?;
        fields.validate()?;
        let post = self.repository.create(&fields).await?;
        tracing::info!("Created blog post {}", post.id);
        Ok(post)
    }

    pub async fn update(&self, id: &str, fields: BlogPostFields) -> Result<BlogPost> {
        self.gate.require_admin().await?;
        fields.validate()?;
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(FolioError::not_found("blog post", id));
        }
        self.repository.update(id, &fields).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.gate.require_admin().await?;
        self.repository.delete(id).await
    }
}

fn matches_term(post: &BlogPostFields, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.excerpt.to_lowercase().contains(needle)
        || post.content.to_lowercase().contains(needle)
        || post.tags.iter().any(|t| t.to_lowercase().contains(needle))
}
