//! Content domain module: blog posts and testimonials.
//!
//! Blog posts carry `views` / `likes` counters that are only ever changed
//! through atomic increments.

mod model;

pub use model::{
    BlogPost, BlogPostFields, LIKES_FIELD, Testimonial, TestimonialFields, VIEWS_FIELD,
};

use crate::repository::Repository;

/// Repository for the blog-posts collection.
pub type BlogRepository = dyn Repository<BlogPost>;

/// Repository for the testimonials collection.
pub type TestimonialRepository = dyn Repository<Testimonial>;
