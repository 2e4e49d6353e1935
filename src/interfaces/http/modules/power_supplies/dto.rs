//! Power supply DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::domain::power_supply::{
    CreatePowerSupplyDto, ListPowerSuppliesDto, PowerSupply, UpdatePowerSupplyDto,
};

/// Power supply API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PowerSupplyDto {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub model: String,
    /// Rated output in watts
    pub power: i32,
    /// Efficiency rating, e.g. "80+ Gold"
    pub efficiency: String,
    pub modular: bool,
    pub price: Decimal,
    pub stock: i32,
    pub description: String,
    /// 1 = listed, 0 = unlisted
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PowerSupply> for PowerSupplyDto {
    fn from(p: PowerSupply) -> Self {
        Self {
            id: p.id,
            name: p.name,
            brand: p.brand,
            model: p.model,
            power: p.power,
            efficiency: p.efficiency,
            modular: p.modular,
            price: p.price,
            stock: p.stock,
            description: p.description,
            status: p.status,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

fn price_error() -> ValidationError {
    let mut err = ValidationError::new("range");
    err.message = Some("price: must not be negative".into());
    err
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create"))]
pub struct CreatePowerSupplyRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "brand must be at most 50 characters"))]
    pub brand: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "model must be at most 50 characters"))]
    pub model: String,
    #[validate(range(min = 0, message = "power must not be negative"))]
    pub power: i32,
    #[serde(default)]
    #[validate(length(max = 20, message = "efficiency must be at most 20 characters"))]
    pub efficiency: String,
    #[serde(default)]
    pub modular: bool,
    pub price: Decimal,
    #[serde(default)]
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: i32,
    #[serde(default)]
    pub description: String,
}

fn validate_create(req: &CreatePowerSupplyRequest) -> Result<(), ValidationError> {
    if req.price < Decimal::ZERO {
        return Err(price_error());
    }
    Ok(())
}

impl From<CreatePowerSupplyRequest> for CreatePowerSupplyDto {
    fn from(r: CreatePowerSupplyRequest) -> Self {
        Self {
            name: r.name,
            brand: r.brand,
            model: r.model,
            power: r.power,
            efficiency: r.efficiency,
            modular: r.modular,
            price: r.price,
            stock: r.stock,
            description: r.description,
        }
    }
}

/// Sparse update. `0` and `false` are real values; omitted fields and empty
/// strings are left untouched.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update"))]
pub struct UpdatePowerSupplyRequest {
    #[validate(length(max = 100, message = "name must be at most 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 50, message = "brand must be at most 50 characters"))]
    pub brand: Option<String>,
    #[validate(length(max = 50, message = "model must be at most 50 characters"))]
    pub model: Option<String>,
    #[validate(range(min = 0, message = "power must not be negative"))]
    pub power: Option<i32>,
    #[validate(length(max = 20, message = "efficiency must be at most 20 characters"))]
    pub efficiency: Option<String>,
    pub modular: Option<bool>,
    pub price: Option<Decimal>,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: Option<i32>,
    pub description: Option<String>,
    #[validate(range(min = 0, max = 1, message = "status must be 0 or 1"))]
    pub status: Option<i32>,
}

fn validate_update(req: &UpdatePowerSupplyRequest) -> Result<(), ValidationError> {
    match req.price {
        Some(p) if p < Decimal::ZERO => Err(price_error()),
        _ => Ok(()),
    }
}

impl From<UpdatePowerSupplyRequest> for UpdatePowerSupplyDto {
    fn from(r: UpdatePowerSupplyRequest) -> Self {
        Self {
            name: r.name,
            brand: r.brand,
            model: r.model,
            power: r.power,
            efficiency: r.efficiency,
            modular: r.modular,
            price: r.price,
            stock: r.stock,
            description: r.description,
            status: r.status,
        }
    }
}

/// List power supplies query parameters
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
pub struct ListPowerSuppliesParams {
    /// Page number (1-based). Default: 1
    pub page: Option<i64>,
    /// Items per page (1–100). Default: 10
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: Option<i64>,
    /// Substring match on name
    pub name: Option<String>,
    /// Substring match on brand
    pub brand: Option<String>,
    /// Minimum wattage (inclusive)
    pub min_power: Option<i32>,
    /// Maximum wattage (inclusive)
    pub max_power: Option<i32>,
    /// Minimum price (inclusive)
    pub min_price: Option<Decimal>,
    /// Maximum price (inclusive)
    pub max_price: Option<Decimal>,
    /// Exact efficiency rating
    pub efficiency: Option<String>,
    /// Exact status (0 or 1)
    pub status: Option<i32>,
}

impl From<ListPowerSuppliesParams> for ListPowerSuppliesDto {
    fn from(p: ListPowerSuppliesParams) -> Self {
        Self {
            page: p.page.unwrap_or_default(),
            page_size: p.page_size.unwrap_or_default(),
            name: p.name,
            brand: p.brand,
            min_power: p.min_power,
            max_power: p.max_power,
            min_price: p.min_price,
            max_price: p.max_price,
            efficiency: p.efficiency,
            status: p.status,
        }
    }
}
