use rust_decimal::Decimal;

/// Input of `PowerSupplyService::create`. There is deliberately no status:
/// new listings always start listed.
#[derive(Debug, Clone, Default)]
pub struct CreatePowerSupplyDto {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub power: i32,
    pub efficiency: String,
    pub modular: bool,
    pub price: Decimal,
    pub stock: i32,
    pub description: String,
}
