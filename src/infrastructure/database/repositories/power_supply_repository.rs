//! SeaORM implementation of the power supply repository traits

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, NotSet, Set};

use super::{BaseRepository, PartialUpdate};
use crate::domain::power_supply::{
    NewPowerSupply, PowerSupply, PowerSupplyChanges, PowerSupplyQuery, PowerSupplyReader,
    PowerSupplyWriter,
};
use crate::infrastructure::database::entities::power_supply::{self, Column};
use crate::infrastructure::database::query::QueryOption;
use crate::shared::AppResult;

pub struct SeaOrmPowerSupplyRepository {
    base: BaseRepository<power_supply::Entity>,
}

impl SeaOrmPowerSupplyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub fn with_query_timeout(self, timeout: Option<Duration>) -> Self {
        Self {
            base: self.base.with_query_timeout(timeout),
        }
    }

    pub fn base(&self) -> &BaseRepository<power_supply::Entity> {
        &self.base
    }
}

fn model_to_domain(m: power_supply::Model) -> PowerSupply {
    PowerSupply {
        id: m.id,
        name: m.name,
        brand: m.brand,
        model: m.model,
        power: m.power,
        efficiency: m.efficiency,
        modular: m.modular,
        price: m.price,
        stock: m.stock,
        description: m.description,
        status: m.status,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

/// Predicates shared by `list` and `count`. Bounds are inclusive.
fn filters(query: &PowerSupplyQuery) -> Vec<QueryOption<Column>> {
    vec![
        QueryOption::like(Column::Name, query.name.as_str()),
        QueryOption::like(Column::Brand, query.brand.as_str()),
        QueryOption::gte_if_present(Column::Power, query.min_power),
        QueryOption::lte_if_present(Column::Power, query.max_power),
        QueryOption::gte_if_present(Column::Price, query.min_price),
        QueryOption::lte_if_present(Column::Price, query.max_price),
        QueryOption::equals_if(
            !query.efficiency.is_empty(),
            Column::Efficiency,
            query.efficiency.as_str(),
        ),
        QueryOption::equals_if_present(Column::Status, query.status),
    ]
}

fn changes_to_update(c: &PowerSupplyChanges) -> PartialUpdate<Column> {
    PartialUpdate::new()
        .set_if_some(Column::Name, c.name.clone())
        .set_if_some(Column::Brand, c.brand.clone())
        .set_if_some(Column::Model, c.model.clone())
        .set_if_some(Column::Power, c.power)
        .set_if_some(Column::Efficiency, c.efficiency.clone())
        .set_if_some(Column::Modular, c.modular)
        .set_if_some(Column::Price, c.price)
        .set_if_some(Column::Stock, c.stock)
        .set_if_some(Column::Description, c.description.clone())
        .set_if_some(Column::Status, c.status)
}

#[async_trait]
impl PowerSupplyReader for SeaOrmPowerSupplyRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<PowerSupply> {
        self.base.find_by_id(id).await.map(model_to_domain)
    }

    async fn list(&self, query: &PowerSupplyQuery) -> AppResult<Vec<PowerSupply>> {
        let mut options = filters(query);
        options.push(QueryOption::order_by_desc(Column::Id));
        options.push(QueryOption::paginate(query.page as i64, query.page_size as i64));

        let rows = self.base.list(&options).await?;
        Ok(rows.into_iter().map(model_to_domain).collect())
    }

    async fn count(&self, query: &PowerSupplyQuery) -> AppResult<u64> {
        self.base.count(&filters(query)).await
    }
}

#[async_trait]
impl PowerSupplyWriter for SeaOrmPowerSupplyRepository {
    async fn create(&self, new: NewPowerSupply) -> AppResult<PowerSupply> {
        let now = Utc::now();
        let model = power_supply::ActiveModel {
            id: NotSet,
            name: Set(new.name),
            brand: Set(new.brand),
            model: Set(new.model),
            power: Set(new.power),
            efficiency: Set(new.efficiency),
            modular: Set(new.modular),
            price: Set(new.price),
            stock: Set(new.stock),
            description: Set(new.description),
            status: Set(new.status),
            created_at: Set(now),
            updated_at: Set(now),
        };
        self.base.create(model).await.map(model_to_domain)
    }

    async fn update(&self, item: &PowerSupply, changes: &PowerSupplyChanges) -> AppResult<()> {
        self.base.update(item, changes_to_update(changes)).await
    }

    async fn update_by_id(&self, id: i64, changes: &PowerSupplyChanges) -> AppResult<()> {
        self.base.update_by_id(id, changes_to_update(changes)).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.base.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::power_supply::{ListPowerSuppliesDto, STATUS_LISTED, STATUS_UNLISTED};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::{init_database, DatabaseConfig};
    use crate::shared::PageInfo;
    use rust_decimal::Decimal;
    use sea_orm_migration::MigratorTrait;

    async fn seeded() -> SeaOrmPowerSupplyRepository {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let repo = SeaOrmPowerSupplyRepository::new(db);

        let rows = [
            ("Corsair RM550x", "Corsair", 550, "80+ Gold", 8950, STATUS_LISTED),
            ("Seasonic Focus GX-650", "Seasonic", 650, "80+ Gold", 10950, STATUS_LISTED),
            ("be quiet! Pure Power 750", "be quiet!", 750, "80+ Bronze", 9950, STATUS_UNLISTED),
            ("Corsair HX850", "Corsair", 850, "80+ Platinum", 16950, STATUS_LISTED),
            ("Seasonic Prime TX-1000", "Seasonic", 1000, "80+ Titanium", 29950, STATUS_LISTED),
        ];
        for (name, brand, power, efficiency, cents, status) in rows {
            repo.create(NewPowerSupply {
                name: name.into(),
                brand: brand.into(),
                model: String::new(),
                power,
                efficiency: efficiency.into(),
                modular: true,
                price: Decimal::new(cents, 2),
                stock: 5,
                description: String::new(),
                status,
            })
            .await
            .unwrap();
        }
        repo
    }

    fn query(dto: ListPowerSuppliesDto) -> PowerSupplyQuery {
        PowerSupplyQuery::new(dto, PageInfo::normalize(1, 100))
    }

    fn powers(items: &[PowerSupply]) -> Vec<i32> {
        items.iter().map(|p| p.power).collect()
    }

    #[tokio::test]
    async fn no_filters_lists_everything_newest_first() {
        let repo = seeded().await;
        let all = repo.list(&PowerSupplyQuery::all()).await.unwrap();
        assert_eq!(powers(&all), vec![1000, 850, 750, 650, 550]);
    }

    #[tokio::test]
    async fn power_range_is_inclusive() {
        let repo = seeded().await;
        let q = query(ListPowerSuppliesDto {
            min_power: Some(600),
            max_power: Some(900),
            ..Default::default()
        });
        let items = repo.list(&q).await.unwrap();
        assert_eq!(powers(&items), vec![850, 750, 650]);
        assert!(items.iter().all(|p| (600..=900).contains(&p.power)));
        assert_eq!(repo.count(&q).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn brand_efficiency_and_status_combine() {
        let repo = seeded().await;
        let q = query(ListPowerSuppliesDto {
            brand: Some("Corsair".into()),
            efficiency: Some("80+ Gold".into()),
            ..Default::default()
        });
        assert_eq!(powers(&repo.list(&q).await.unwrap()), vec![550]);

        let unlisted = query(ListPowerSuppliesDto {
            status: Some(STATUS_UNLISTED),
            ..Default::default()
        });
        assert_eq!(powers(&repo.list(&unlisted).await.unwrap()), vec![750]);
    }

    #[tokio::test]
    async fn price_bounds_filter() {
        let repo = seeded().await;
        let q = query(ListPowerSuppliesDto {
            min_price: Some(Decimal::new(10000, 2)),
            max_price: Some(Decimal::new(20000, 2)),
            ..Default::default()
        });
        assert_eq!(powers(&repo.list(&q).await.unwrap()), vec![850, 650]);
    }

    #[tokio::test]
    async fn zero_stock_update_is_written() {
        let repo = seeded().await;
        let changes = PowerSupplyChanges {
            stock: Some(0),
            modular: Some(false),
            ..Default::default()
        };
        repo.update_by_id(1, &changes).await.unwrap();

        let fresh = repo.find_by_id(1).await.unwrap();
        assert_eq!(fresh.stock, 0);
        assert!(!fresh.modular);
        assert_eq!(fresh.name, "Corsair RM550x");
    }
}
