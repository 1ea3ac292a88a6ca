use crate::domain::{models::property::Property, ports::PropertyRepository};
use crate::domain::services::catalog::{CatalogQuery, PAGE_SIZE};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

pub struct SqlitePropertyRepo {
    pool: SqlitePool,
}

impl SqlitePropertyRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, query: &CatalogQuery) {
    if let Some(ref lt) = query.listing_type {
        qb.push(" AND listing_type = ").push_bind(lt.clone());
    }
    if let Some(ref pt) = query.property_type {
        qb.push(" AND property_type = ").push_bind(pt.clone());
    }
    if let Some(min) = query.min_price {
        qb.push(" AND price >= ").push_bind(min);
    }
    if let Some(max) = query.max_price {
        qb.push(" AND price <= ").push_bind(max);
    }
    if let Some(min) = query.min_area {
        qb.push(" AND area >= ").push_bind(min);
    }
    if let Some(max) = query.max_area {
        qb.push(" AND area <= ").push_bind(max);
    }
    if let Some(beds) = query.bedrooms {
        qb.push(" AND bedrooms >= ").push_bind(beds);
    }
    if let Some(baths) = query.bathrooms {
        qb.push(" AND bathrooms >= ").push_bind(baths);
    }
    if let Some(min) = query.min_year {
        qb.push(" AND year_built >= ").push_bind(min);
    }
    if let Some(max) = query.max_year {
        qb.push(" AND year_built <= ").push_bind(max);
    }
    if let Some(furnished) = query.furnished {
        qb.push(" AND furnished = ").push_bind(furnished);
    }
    if !query.amenities.is_empty() {
        // Superset check: no requested tag may be missing from the row.
        let requested = serde_json::to_string(&query.amenities).unwrap_or_else(|_| "[]".to_string());
        qb.push(" AND NOT EXISTS (SELECT 1 FROM json_each(");
        qb.push_bind(requested);
        qb.push(") AS req WHERE req.value NOT IN (SELECT value FROM json_each(properties.amenities)))");
    }
}

#[async_trait]
impl PropertyRepository for SqlitePropertyRepo {
    async fn create(&self, property: &Property) -> Result<Property, AppError> {
        sqlx::query_as::<_, Property>(
            "INSERT INTO properties (id, title, description, price, listing_type, status, featured, location, latitude, longitude, property_type, bedrooms, bathrooms, area, year_built, floor_number, total_floors, parking_spaces, furnished, heating_type, cooling_type, images, floor_plans, rooms, amenities, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&property.id).bind(&property.title).bind(&property.description).bind(property.price)
            .bind(&property.listing_type).bind(&property.status).bind(property.featured).bind(&property.location)
            .bind(property.latitude).bind(property.longitude).bind(&property.property_type)
            .bind(property.bedrooms).bind(property.bathrooms).bind(property.area).bind(property.year_built)
            .bind(property.floor_number).bind(property.total_floors).bind(property.parking_spaces)
            .bind(property.furnished).bind(&property.heating_type).bind(&property.cooling_type)
            .bind(&property.images).bind(&property.floor_plans).bind(&property.rooms).bind(&property.amenities)
            .bind(property.created_at).bind(property.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Property>, AppError> {
        sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, property: &Property, expected_updated_at: DateTime<Utc>) -> Result<Property, AppError> {
        let updated = sqlx::query_as::<_, Property>(
            "UPDATE properties SET title=?, description=?, price=?, listing_type=?, status=?, featured=?, location=?, latitude=?, longitude=?, property_type=?, bedrooms=?, bathrooms=?, area=?, year_built=?, floor_number=?, total_floors=?, parking_spaces=?, furnished=?, heating_type=?, cooling_type=?, images=?, floor_plans=?, rooms=?, amenities=?, updated_at=?
             WHERE id=? AND updated_at=?
             RETURNING *"
        )
            .bind(&property.title).bind(&property.description).bind(property.price).bind(&property.listing_type)
            .bind(&property.status).bind(property.featured).bind(&property.location)
            .bind(property.latitude).bind(property.longitude).bind(&property.property_type)
            .bind(property.bedrooms).bind(property.bathrooms).bind(property.area).bind(property.year_built)
            .bind(property.floor_number).bind(property.total_floors).bind(property.parking_spaces)
            .bind(property.furnished).bind(&property.heating_type).bind(&property.cooling_type)
            .bind(&property.images).bind(&property.floor_plans).bind(&property.rooms).bind(&property.amenities)
            .bind(property.updated_at)
            .bind(&property.id).bind(expected_updated_at)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?;

        match updated {
            Some(p) => Ok(p),
            None => {
                if self.find_by_id(&property.id).await?.is_some() {
                    Err(AppError::Conflict("Listing was modified concurrently".to_string()))
                } else {
                    Err(AppError::NotFound("Listing not found".to_string()))
                }
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Listing not found".into()));
        }
        Ok(())
    }

    async fn search(&self, query: &CatalogQuery) -> Result<(Vec<Property>, i64), AppError> {
        let mut count_qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT COUNT(*) as count FROM properties WHERE status IN ('active', 'sold', 'rented')"
        );
        push_filters(&mut count_qb, query);
        let total = count_qb.build()
            .fetch_one(&self.pool).await.map_err(AppError::Database)?
            .get::<i64, _>("count");

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT * FROM properties WHERE status IN ('active', 'sold', 'rented')"
        );
        push_filters(&mut qb, query);
        qb.push(" ORDER BY featured DESC, created_at DESC LIMIT ");
        qb.push_bind(PAGE_SIZE);
        qb.push(" OFFSET ");
        qb.push_bind(query.offset());

        let properties = qb.build_query_as::<Property>()
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;

        Ok((properties, total))
    }

    async fn list(&self) -> Result<Vec<Property>, AppError> {
        sqlx::query_as::<_, Property>("SELECT * FROM properties ORDER BY created_at DESC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
