//! Testimonial use cases.

use super::admin::AdminGate;
use folio_core::content::{Testimonial, TestimonialFields};
use folio_core::error::{FolioError, Result};
use folio_core::repository::Repository;
use folio_core::stats::{self, TestimonialStats};
use folio_core::store::{Filter, Query};
use std::sync::Arc;

pub struct TestimonialUseCase {
    repository: Arc<dyn Repository<Testimonial>>,
    gate: AdminGate,
}

impl TestimonialUseCase {
    pub fn new(repository: Arc<dyn Repository<Testimonial>>, gate: AdminGate) -> Self {
        Self { repository, gate }
    }

    pub async fn list(&self) -> Result<Vec<Testimonial>> {
        self.repository.list_all().await
    }

    pub async fn featured(&self) -> Result<Vec<Testimonial>> {
        self.repository
            .list(Query::new().filter(Filter::eq("featured", true)))
            .await
    }

    /// Testimonials rated at least `min_rating`.
    pub async fn by_min_rating(&self, min_rating: u8) -> Result<Vec<Testimonial>> {
        self.repository
            .list(Query::new().filter(Filter::gte("rating", min_rating)))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Testimonial>> {
        self.repository.find_by_id(id).await
    }

    pub async fn stats(&self) -> Result<TestimonialStats> {
        Ok(stats::testimonial_stats(&self.list().await?))
    }

    pub async fn create(&self, fields: TestimonialFields) -> Result<Testimonial> {
        self.gate.require_admin().await?;
        fields.validate()?;
        self.repository.create(&fields).await
    }

    pub async fn update(&self, id: &str, fields: TestimonialFields) -> Result<Testimonial> {
        self.gate.require_admin().await?;
        fields.validate()?;
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(FolioError::not_found("testimonial", id));
        }
        self.repository.update(id, &fields).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.gate.require_admin().await?;
        self.repository.delete(id).await
    }
}
