use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoomSpec {
    pub name: String,
    pub area: f64,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Property {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub listing_type: String,
    pub status: String,
    pub featured: bool,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub property_type: String,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: f64,
    pub year_built: Option<i32>,
    pub floor_number: Option<i32>,
    pub total_floors: Option<i32>,
    pub parking_spaces: Option<i32>,
    pub furnished: Option<bool>,
    pub heating_type: Option<String>,
    pub cooling_type: Option<String>,
    pub images: Json<Vec<String>>,
    pub floor_plans: Json<Vec<String>>,
    pub rooms: Json<Vec<RoomSpec>>,
    pub amenities: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewPropertyParams {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub listing_type: String,
    pub status: String,
    pub featured: bool,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub property_type: String,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: f64,
    pub year_built: Option<i32>,
    pub floor_number: Option<i32>,
    pub total_floors: Option<i32>,
    pub parking_spaces: Option<i32>,
    pub furnished: Option<bool>,
    pub heating_type: Option<String>,
    pub cooling_type: Option<String>,
    pub images: Vec<String>,
    pub floor_plans: Vec<String>,
    pub rooms: Vec<RoomSpec>,
    pub amenities: Vec<String>,
}

impl Property {
    pub fn new(params: NewPropertyParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            description: params.description,
            price: params.price,
            listing_type: params.listing_type,
            status: params.status,
            featured: params.featured,
            location: params.location,
            latitude: params.latitude,
            longitude: params.longitude,
            property_type: params.property_type,
            bedrooms: params.bedrooms,
            bathrooms: params.bathrooms,
            area: params.area,
            year_built: params.year_built,
            floor_number: params.floor_number,
            total_floors: params.total_floors,
            parking_spaces: params.parking_spaces,
            furnished: params.furnished,
            heating_type: params.heating_type,
            cooling_type: params.cooling_type,
            images: Json(params.images),
            floor_plans: Json(params.floor_plans),
            rooms: Json(params.rooms),
            amenities: Json(params.amenities),
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves `image` to the front of the image list; the first entry is the
    /// listing's cover. Relative order of the remaining images is kept.
    pub fn set_cover(&mut self, image: &str) -> bool {
        let Some(pos) = self.images.0.iter().position(|i| i == image) else {
            return false;
        };
        let key = self.images.0.remove(pos);
        self.images.0.insert(0, key);
        true
    }
}
