use crate::domain::models::property::Property;
use serde::Serialize;

#[derive(Serialize)]
pub struct SlotStatus {
    pub time: String,
    pub available: bool,
}

#[derive(Serialize)]
pub struct SlotsResponse {
    pub date: String,
    pub slots: Vec<SlotStatus>,
}

#[derive(Serialize)]
pub struct CatalogResponse {
    pub properties: Vec<Property>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub key: String,
    pub url: String,
}
