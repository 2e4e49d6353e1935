use rust_decimal::Decimal;

/// Sparse patch. Text fields are ignored when empty; numeric and boolean
/// fields are applied whenever present, so `Some(0)` and `Some(false)` are
/// real updates.
#[derive(Debug, Clone, Default)]
pub struct UpdatePowerSupplyDto {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub power: Option<i32>,
    pub efficiency: Option<String>,
    pub modular: Option<bool>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub description: Option<String>,
    pub status: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerSupplyChanges {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub power: Option<i32>,
    pub efficiency: Option<String>,
    pub modular: Option<bool>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub description: Option<String>,
    pub status: Option<i32>,
}

impl PowerSupplyChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<UpdatePowerSupplyDto> for PowerSupplyChanges {
    fn from(dto: UpdatePowerSupplyDto) -> Self {
        Self {
            name: non_empty(dto.name),
            brand: non_empty(dto.brand),
            model: non_empty(dto.model),
            power: dto.power,
            efficiency: non_empty(dto.efficiency),
            modular: dto.modular,
            price: dto.price,
            stock: dto.stock,
            description: non_empty(dto.description),
            status: dto.status,
        }
    }
}
