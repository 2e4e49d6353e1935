//! Power supply catalog aggregate

pub mod model;
pub mod repository;

mod dto_create;
mod dto_list;
mod dto_update;

pub use model::{NewPowerSupply, PowerSupply, STATUS_LISTED, STATUS_UNLISTED};

pub use dto_create::CreatePowerSupplyDto;
pub use dto_list::{ListPowerSuppliesDto, PowerSupplyQuery};
pub use dto_update::{PowerSupplyChanges, UpdatePowerSupplyDto};

pub use repository::{PowerSupplyReader, PowerSupplyRepository, PowerSupplyWriter};
