use rust_decimal::Decimal;

use crate::shared::PageInfo;

#[derive(Debug, Clone, Default)]
pub struct ListPowerSuppliesDto {
    pub page: i64,
    pub page_size: i64,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub min_power: Option<i32>,
    pub max_power: Option<i32>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub efficiency: Option<String>,
    pub status: Option<i32>,
}

/// Query options for catalog listing. Bounds are inclusive; `None` bounds
/// are not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerSupplyQuery {
    pub page: u64,
    pub page_size: u64,
    pub name: String,
    pub brand: String,
    pub min_power: Option<i32>,
    pub max_power: Option<i32>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub efficiency: String,
    pub status: Option<i32>,
}

impl PowerSupplyQuery {
    pub fn new(dto: ListPowerSuppliesDto, page: PageInfo) -> Self {
        Self {
            page: page.page,
            page_size: page.page_size,
            name: dto.name.unwrap_or_default(),
            brand: dto.brand.unwrap_or_default(),
            min_power: dto.min_power,
            max_power: dto.max_power,
            min_price: dto.min_price,
            max_price: dto.max_price,
            efficiency: dto.efficiency.unwrap_or_default(),
            status: dto.status,
        }
    }

    pub fn all() -> Self {
        Self::new(ListPowerSuppliesDto::default(), PageInfo::normalize(0, 0))
    }
}
