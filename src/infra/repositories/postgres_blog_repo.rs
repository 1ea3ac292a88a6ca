use crate::domain::{models::blog_post::BlogPost, ports::BlogPostRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresBlogRepo {
    pool: PgPool,
}

impl PostgresBlogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogPostRepository for PostgresBlogRepo {
    async fn create(&self, post: &BlogPost) -> Result<BlogPost, AppError> {
        sqlx::query_as::<_, BlogPost>(
            "INSERT INTO blog_posts (id, title, slug, excerpt, content, featured_image, author, status, featured, published_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING *"
        )
            .bind(&post.id).bind(&post.title).bind(&post.slug).bind(&post.excerpt).bind(&post.content)
            .bind(&post.featured_image).bind(&post.author).bind(&post.status).bind(post.featured)
            .bind(post.published_at).bind(post.created_at).bind(post.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<BlogPost>, AppError> {
        sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError> {
        sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE slug = $1")
            .bind(slug).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, post: &BlogPost) -> Result<BlogPost, AppError> {
        sqlx::query_as::<_, BlogPost>(
            "UPDATE blog_posts SET title=$1, slug=$2, excerpt=$3, content=$4, featured_image=$5, author=$6, status=$7, featured=$8, published_at=$9, updated_at=$10
             WHERE id=$11
             RETURNING *"
        )
            .bind(&post.title).bind(&post.slug).bind(&post.excerpt).bind(&post.content)
            .bind(&post.featured_image).bind(&post.author).bind(&post.status).bind(post.featured)
            .bind(post.published_at).bind(post.updated_at)
            .bind(&post.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Post not found".into()));
        }
        Ok(())
    }

    async fn list_published(&self) -> Result<Vec<BlogPost>, AppError> {
        sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts WHERE status = 'published' ORDER BY published_at DESC"
        )
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<BlogPost>, AppError> {
        sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts ORDER BY created_at DESC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
