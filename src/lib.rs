//! Kardex Core Library
//!
//! Warehouse inventory ledger engine. Vouchers record stock movements
//! against (warehouse, article) pairs; the stock accumulator maintains
//! running quantities and moving-average costs, and the kardex keeps an
//! append-only audit trail for historical reporting.
//!
//! This crate is the in-process accounting core. The HTTP/CRUD surface,
//! authentication and lookup-table management are external collaborators
//! that hand the core validated reference ids and an authenticated actor.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod migrator;
pub mod services;

use std::sync::Arc;

use crate::config::StockPolicy;
use crate::db::DbPool;
use crate::events::EventSender;
use crate::services::{KardexService, ReferenceDataService, StockService, VoucherService};

/// Single entry point the embedding layer consumes: wires the reference-data
/// seam, the stock accumulator, the kardex recorder and the voucher
/// orchestrator over one connection pool.
#[derive(Clone)]
pub struct InventoryCore {
    db: Arc<DbPool>,
    reference: ReferenceDataService,
    stock: StockService,
    kardex: KardexService,
    vouchers: VoucherService,
}

impl InventoryCore {
    pub fn new(
        db: Arc<DbPool>,
        event_sender: Option<Arc<EventSender>>,
        policy: StockPolicy,
    ) -> Self {
        let reference = ReferenceDataService::new(db.clone());
        let stock = StockService::new(db.clone(), policy);
        let kardex = KardexService::new(db.clone());
        let vouchers = VoucherService::new(
            db.clone(),
            event_sender,
            reference.clone(),
            stock.clone(),
            kardex.clone(),
        );
        Self {
            db,
            reference,
            stock,
            kardex,
            vouchers,
        }
    }

    pub fn db(&self) -> &Arc<DbPool> {
        &self.db
    }

    pub fn reference(&self) -> &ReferenceDataService {
        &self.reference
    }

    pub fn stock(&self) -> &StockService {
        &self.stock
    }

    pub fn kardex(&self) -> &KardexService {
        &self.kardex
    }

    pub fn vouchers(&self) -> &VoucherService {
        &self.vouchers
    }
}

pub mod prelude {
    pub use crate::config::{AppConfig, StockPolicy};
    pub use crate::db::DbPool;
    pub use crate::errors::ServiceError;
    pub use crate::events::{Event, EventSender};
    pub use crate::services::kardex::{KardexPage, KardexTotals};
    pub use crate::services::stock::{AppliedMovement, StockLevel};
    pub use crate::services::vouchers::{
        CreateVoucherRequest, LineInput, UpdateVoucherRequest, VoucherListResponse, VoucherQuery,
        VoucherResponse, VoucherWithLines,
    };
    pub use crate::services::{KardexService, ReferenceDataService, StockService, VoucherService};
    pub use crate::InventoryCore;
}
