use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub author: String,
    pub status: String,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewBlogPostParams {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub author: String,
    pub status: String,
    pub featured: bool,
}

impl BlogPost {
    pub fn new(params: NewBlogPostParams) -> Self {
        let now = Utc::now();
        let published_at = if params.status == "published" { Some(now) } else { None };
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            slug: params.slug,
            excerpt: params.excerpt,
            content: params.content,
            featured_image: params.featured_image,
            author: params.author,
            status: params.status,
            featured: params.featured,
            published_at,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Slugs are lowercase alphanumerics separated by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return false;
    }
    slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
