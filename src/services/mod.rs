// Core services
pub mod kardex;
pub mod reference;
pub mod stock;
pub mod vouchers;

pub use kardex::KardexService;
pub use reference::ReferenceDataService;
pub use stock::StockService;
pub use vouchers::VoucherService;
