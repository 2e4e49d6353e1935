//! Power-supply catalog service

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::power_supply::{
    CreatePowerSupplyDto, ListPowerSuppliesDto, NewPowerSupply, PowerSupply, PowerSupplyChanges,
    PowerSupplyQuery, PowerSupplyRepository, UpdatePowerSupplyDto, STATUS_LISTED,
};
use crate::shared::{AppResult, PageInfo, PaginatedResult};

pub struct PowerSupplyService<R: PowerSupplyRepository> {
    repo: Arc<R>,
}

impl<R: PowerSupplyRepository> PowerSupplyService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// New entries are always listed.
    pub async fn create(&self, dto: CreatePowerSupplyDto) -> AppResult<PowerSupply> {
        let item = self
            .repo
            .create(NewPowerSupply {
                name: dto.name,
                brand: dto.brand,
                model: dto.model,
                power: dto.power,
                efficiency: dto.efficiency,
                modular: dto.modular,
                price: dto.price,
                stock: dto.stock,
                description: dto.description,
                status: STATUS_LISTED,
            })
            .await?;

        info!(id = item.id, name = %item.name, brand = %item.brand, "Power supply created");
        Ok(item)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<PowerSupply> {
        self.repo.find_by_id(id).await
    }

    /// Sparse patch; see `UserService::update` for the write/re-read rule.
    pub async fn update(&self, id: i64, dto: UpdatePowerSupplyDto) -> AppResult<PowerSupply> {
        let item = self.repo.find_by_id(id).await?;

        let changes = PowerSupplyChanges::from(dto);
        if changes.is_empty() {
            debug!(id, "Empty power supply patch, nothing to write");
            return Ok(item);
        }

        self.repo.update(&item, &changes).await?;
        info!(id, "Power supply updated");
        self.repo.find_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await?;
        info!(id, "Power supply deleted");
        Ok(())
    }

    pub async fn list(&self, dto: ListPowerSuppliesDto) -> AppResult<PaginatedResult<PowerSupply>> {
        let page = PageInfo::normalize(dto.page, dto.page_size);
        let query = PowerSupplyQuery::new(dto, page);

        let total = self.repo.count(&query).await?;
        let items = self.repo.list(&query).await?;

        Ok(PaginatedResult::new(items, total, page))
    }

    /// Total matching the filter, ignoring pagination.
    pub async fn count(&self, dto: ListPowerSuppliesDto) -> AppResult<u64> {
        let query = PowerSupplyQuery::new(dto, PageInfo::default());
        self.repo.count(&query).await
    }
}
