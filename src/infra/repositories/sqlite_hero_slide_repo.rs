use crate::domain::{models::hero_slide::HeroSlide, ports::HeroSlideRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteHeroSlideRepo {
    pool: SqlitePool,
}

impl SqliteHeroSlideRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HeroSlideRepository for SqliteHeroSlideRepo {
    async fn create(&self, slide: &HeroSlide) -> Result<HeroSlide, AppError> {
        sqlx::query_as::<_, HeroSlide>(
            "INSERT INTO hero_slides (id, image, title, highlight, subtitle, active, sort_order, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&slide.id).bind(&slide.image).bind(&slide.title).bind(&slide.highlight)
            .bind(&slide.subtitle).bind(slide.active).bind(slide.sort_order)
            .bind(slide.created_at).bind(slide.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<HeroSlide>, AppError> {
        sqlx::query_as::<_, HeroSlide>("SELECT * FROM hero_slides WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, slide: &HeroSlide) -> Result<HeroSlide, AppError> {
        sqlx::query_as::<_, HeroSlide>(
            "UPDATE hero_slides SET image=?, title=?, highlight=?, subtitle=?, active=?, sort_order=?, updated_at=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&slide.image).bind(&slide.title).bind(&slide.highlight).bind(&slide.subtitle)
            .bind(slide.active).bind(slide.sort_order).bind(slide.updated_at)
            .bind(&slide.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM hero_slides WHERE id = ?")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Slide not found".into()));
        }
        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<HeroSlide>, AppError> {
        sqlx::query_as::<_, HeroSlide>(
            "SELECT * FROM hero_slides WHERE active = 1 ORDER BY sort_order ASC, created_at ASC"
        )
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<HeroSlide>, AppError> {
        sqlx::query_as::<_, HeroSlide>("SELECT * FROM hero_slides ORDER BY sort_order ASC, created_at ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
