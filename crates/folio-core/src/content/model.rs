//! Blog post and testimonial domain models.

use crate::store::{Document, OrderBy};
use crate::validation::Validator;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Counter field incremented on every blog post view.
pub const VIEWS_FIELD: &str = "views";
/// Counter field incremented on every blog post like.
pub const LIKES_FIELD: &str = "likes";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostFields {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub published_date: Option<NaiveDate>,
    /// Estimated reading time in minutes.
    #[serde(default)]
    pub reading_time: u32,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
}

impl BlogPostFields {
    pub fn validate(&self) -> crate::error::Result<()> {
        Validator::new()
            .required("Title", &self.title)
            .required("Content", &self.content)
            .required("Category", &self.category)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    #[serde(flatten)]
    pub fields: BlogPostFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for BlogPost {
    type Fields = BlogPostFields;
    const COLLECTION: &'static str = "blog-posts";
    const ENTITY_NAME: &'static str = "blog post";

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("createdAt"))
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn fields(&self) -> &BlogPostFields {
        &self.fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialFields {
    pub name: String,
    pub position: String,
    pub company: String,
    pub content: String,
    #[serde(default)]
    pub avatar: Option<String>,
    /// 1 to 5 stars.
    pub rating: u8,
    #[serde(default)]
    pub featured: bool,
}

impl TestimonialFields {
    pub fn validate(&self) -> crate::error::Result<()> {
        Validator::new()
            .required("Name", &self.name)
            .required("Content", &self.content)
            .check((1..=5).contains(&self.rating), "Rating must be between 1 and 5")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    #[serde(flatten)]
    pub fields: TestimonialFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Testimonial {
    type Fields = TestimonialFields;
    const COLLECTION: &'static str = "testimonials";
    const ENTITY_NAME: &'static str = "testimonial";

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("createdAt"))
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn fields(&self) -> &TestimonialFields {
        &self.fields
    }
}
