use serde::Deserialize;
use crate::error::AppError;

pub const PAGE_SIZE: i64 = 20;

/// Raw query-string parameters of the public catalog, as sent by the site.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogParams {
    #[serde(rename = "type")]
    pub listing_type: Option<String>,
    pub property_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_area: Option<String>,
    pub max_area: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub min_year: Option<String>,
    pub max_year: Option<String>,
    pub furnished: Option<String>,
    pub amenities: Option<String>,
    pub page: Option<String>,
}

/// Validated catalog query. Pagination is fixed at 20 per page, 1-indexed;
/// ordering is always featured first, newest first.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub listing_type: Option<String>,
    pub property_type: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub furnished: Option<bool>,
    pub amenities: Vec<String>,
    pub page: i64,
}

impl CatalogQuery {
    pub fn from_params(params: CatalogParams) -> Result<Self, AppError> {
        let listing_type = match params.listing_type {
            Some(t) if t == "sale" || t == "rent" => Some(t),
            Some(t) => return Err(AppError::Validation(format!("Unknown listing type '{}'", t))),
            None => None,
        };

        let furnished = match params.furnished.as_deref() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(v) => return Err(AppError::Validation(format!("Invalid furnished value '{}'", v))),
            None => None,
        };

        let amenities = params.amenities
            .map(|a| {
                a.split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let page = match params.page {
            Some(p) => parse_num::<i64>("page", &p)?.max(1),
            None => 1,
        };

        Ok(Self {
            listing_type,
            property_type: params.property_type,
            min_price: parse_opt("minPrice", params.min_price)?,
            max_price: parse_opt("maxPrice", params.max_price)?,
            min_area: parse_opt("minArea", params.min_area)?,
            max_area: parse_opt("maxArea", params.max_area)?,
            bedrooms: parse_opt("bedrooms", params.bedrooms)?,
            bathrooms: parse_opt("bathrooms", params.bathrooms)?,
            min_year: parse_opt("minYear", params.min_year)?,
            max_year: parse_opt("maxYear", params.max_year)?,
            furnished,
            amenities,
            page,
        })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * PAGE_SIZE
    }

    pub fn total_pages(total: i64) -> i64 {
        (total + PAGE_SIZE - 1) / PAGE_SIZE
    }
}

fn parse_num<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, AppError> {
    value.parse::<T>()
        .map_err(|_| AppError::Validation(format!("Invalid value for '{}'", name)))
}

fn parse_opt<T: std::str::FromStr>(name: &str, value: Option<String>) -> Result<Option<T>, AppError> {
    match value {
        Some(v) => Ok(Some(parse_num(name, &v)?)),
        None => Ok(None),
    }
}
