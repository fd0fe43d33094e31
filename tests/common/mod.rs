#![allow(dead_code)]

use std::sync::Arc;

use kardex_core::{
    config::{AppConfig, StockPolicy},
    db::{self, DbPool},
    entities::{article, business_partner, document_type, movement_type, user, warehouse},
    events::{self, EventSender},
    services::vouchers::{CreateVoucherRequest, LineInput},
    InventoryCore,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tokio::sync::mpsc;

/// Harness wiring an `InventoryCore` over an in-memory SQLite database with
/// the embedded migrations applied and minimal reference data seeded.
pub struct TestCore {
    pub db: Arc<DbPool>,
    pub core: InventoryCore,
    pub warehouse_id: i32,
    pub other_warehouse_id: i32,
    pub article_id: i32,
    pub other_article_id: i32,
    pub ingress_type_id: i32,
    pub egress_type_id: i32,
    pub user_id: i32,
    pub partner_id: i32,
    pub document_type_id: i32,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestCore {
    pub async fn new() -> Self {
        Self::with_policy(StockPolicy::default()).await
    }

    pub async fn with_policy(policy: StockPolicy) -> Self {
        let mut cfg = AppConfig::new("sqlite::memory:");
        // A single connection keeps the in-memory database alive and mirrors
        // SQLite's serialized-writer behavior.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.db_acquire_timeout_secs = 30;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool).await.expect("migrations failed");
        let db = Arc::new(pool);

        let (tx, rx) = mpsc::channel(256);
        let sender = Arc::new(EventSender::new(tx));
        let event_task = tokio::spawn(events::process_events(rx));

        let core = InventoryCore::new(db.clone(), Some(sender), policy);

        let main_warehouse = warehouse::ActiveModel {
            code: Set("ALM001".to_string()),
            name: Set("Main warehouse".to_string()),
            kind: Set(warehouse::WarehouseKind::General),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&*db)
        .await
        .expect("seed warehouse");

        let other_warehouse = warehouse::ActiveModel {
            code: Set("ALM002".to_string()),
            name: Set("Finished goods".to_string()),
            kind: Set(warehouse::WarehouseKind::Finished),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&*db)
        .await
        .expect("seed warehouse");

        let laptop = article::ActiveModel {
            code: Set("ART-0001".to_string()),
            name: Set("Laptop 13in".to_string()),
            unit_code: Set("UND".to_string()),
            category_id: Set(1),
            unit_price: Set(dec!(1500)),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&*db)
        .await
        .expect("seed article");

        let mouse = article::ActiveModel {
            code: Set("ART-0002".to_string()),
            name: Set("Wireless mouse".to_string()),
            unit_code: Set("UND".to_string()),
            category_id: Set(1),
            unit_price: Set(dec!(25)),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&*db)
        .await
        .expect("seed article");

        let actor = user::ActiveModel {
            username: Set("jdoe".to_string()),
            full_name: Set("John Doe".to_string()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&*db)
        .await
        .expect("seed user");

        let partner = business_partner::ActiveModel {
            name: Set("Acme Supplies".to_string()),
            tax_id: Set("20100100101".to_string()),
            is_supplier: Set(true),
            is_customer: Set(false),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&*db)
        .await
        .expect("seed partner");

        let receipt_note = document_type::ActiveModel {
            code: Set("GR".to_string()),
            name: Set("Goods receipt note".to_string()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&*db)
        .await
        .expect("seed document type");

        // The movement-type catalogue comes from the seed migration.
        let ingress = find_movement_type(&db, "I01").await;
        let egress = find_movement_type(&db, "S01").await;

        Self {
            warehouse_id: main_warehouse.id,
            other_warehouse_id: other_warehouse.id,
            article_id: laptop.id,
            other_article_id: mouse.id,
            ingress_type_id: ingress.id,
            egress_type_id: egress.id,
            user_id: actor.id,
            partner_id: partner.id,
            document_type_id: receipt_note.id,
            db,
            core,
            _event_task: event_task,
        }
    }

    /// A second core over the same database with a different stock policy.
    pub fn core_with_policy(&self, policy: StockPolicy) -> InventoryCore {
        InventoryCore::new(self.db.clone(), None, policy)
    }

    pub fn create_request(&self, code: &str, movement_type_id: i32) -> CreateVoucherRequest {
        CreateVoucherRequest {
            code: code.to_string(),
            warehouse_id: self.warehouse_id,
            movement_type_id,
            user_id: self.user_id,
            partner_id: Some(self.partner_id),
            document_type_id: Some(self.document_type_id),
            document_series: Some("F001".to_string()),
            document_number: Some("000123".to_string()),
            voucher_date: None,
        }
    }

    /// Creates a voucher and returns its id.
    pub async fn create_voucher(&self, code: &str, movement_type_id: i32) -> i32 {
        self.core
            .vouchers()
            .create_voucher(self.create_request(code, movement_type_id))
            .await
            .expect("create voucher")
            .id
    }

    /// Creates a voucher and applies a single line to the default pair.
    pub async fn apply_single_line(
        &self,
        code: &str,
        movement_type_id: i32,
        quantity: Decimal,
        unit_cost: Decimal,
    ) -> i32 {
        let voucher_id = self.create_voucher(code, movement_type_id).await;
        self.core
            .vouchers()
            .add_lines(
                voucher_id,
                vec![LineInput {
                    article_id: self.article_id,
                    quantity,
                    unit_cost,
                    item_number: None,
                }],
            )
            .await
            .expect("apply line");
        voucher_id
    }
}

async fn find_movement_type(db: &DbPool, code: &str) -> movement_type::Model {
    movement_type::Entity::find()
        .filter(movement_type::Column::Code.eq(code))
        .one(db)
        .await
        .expect("query movement type")
        .unwrap_or_else(|| panic!("movement type {code} should be seeded"))
}
