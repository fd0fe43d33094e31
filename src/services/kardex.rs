use crate::{
    db::DbPool,
    entities::kardex_entry::{self, Entity as KardexEntry},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// One page of the kardex trail for a (warehouse, article) pair, ordered by
/// recording time ascending. Re-issuing the query with the next page number
/// restarts the sequence where it left off.
#[derive(Debug, Clone)]
pub struct KardexPage {
    pub entries: Vec<kardex_entry::Model>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Aggregates over a pair's kardex trail, used by reporting consumers and by
/// the balance/kardex cross-check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KardexTotals {
    pub entries: u64,
    pub quantity: Decimal,
}

/// Kardex recorder: appends one immutable audit row per applied movement
/// line and serves the historical read path.
#[derive(Clone)]
pub struct KardexService {
    db_pool: Arc<DbPool>,
}

impl KardexService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Appends one entry in the caller's transaction. Pure append: business
    /// validation happens upstream, only storage errors are surfaced here.
    pub async fn record(
        &self,
        txn: &DatabaseTransaction,
        warehouse_id: i32,
        article_id: i32,
        voucher_line_id: i32,
        signed_quantity: Decimal,
        unit_cost_used: Decimal,
        recorded_at: DateTime<Utc>,
    ) -> Result<i32, ServiceError> {
        let entry = kardex_entry::ActiveModel {
            warehouse_id: Set(warehouse_id),
            article_id: Set(article_id),
            voucher_line_id: Set(voucher_line_id),
            recorded_at: Set(recorded_at),
            quantity: Set(signed_quantity),
            unit_cost: Set(unit_cost_used),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        debug!(
            kardex_entry_id = entry.id,
            warehouse_id,
            article_id,
            voucher_line_id,
            quantity = %signed_quantity,
            "Kardex entry recorded"
        );

        Ok(entry.id)
    }

    /// Reads a pair's kardex trail ascending by recording time, optionally
    /// bounded to a date range.
    #[instrument(skip(self))]
    pub async fn list_kardex(
        &self,
        warehouse_id: i32,
        article_id: i32,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        page: u64,
        per_page: u64,
    ) -> Result<KardexPage, ServiceError> {
        let mut select = KardexEntry::find()
            .filter(kardex_entry::Column::WarehouseId.eq(warehouse_id))
            .filter(kardex_entry::Column::ArticleId.eq(article_id));

        if let Some(from) = from {
            select = select.filter(kardex_entry::Column::RecordedAt.gte(from));
        }
        if let Some(to) = to {
            select = select.filter(kardex_entry::Column::RecordedAt.lte(to));
        }

        let page = page.max(1);
        let per_page = per_page.max(1);
        let paginator = select
            .order_by_asc(kardex_entry::Column::RecordedAt)
            .order_by_asc(kardex_entry::Column::Id)
            .paginate(&*self.db_pool, per_page);

        let total = paginator.num_items().await?;
        let entries = paginator.fetch_page(page - 1).await?;

        Ok(KardexPage {
            entries,
            total,
            page,
            per_page,
        })
    }

    /// Entry count and signed-quantity sum for a pair's whole trail.
    #[instrument(skip(self))]
    pub async fn movement_totals(
        &self,
        warehouse_id: i32,
        article_id: i32,
    ) -> Result<KardexTotals, ServiceError> {
        let row = KardexEntry::find()
            .select_only()
            .column_as(Expr::col(kardex_entry::Column::Id).count(), "entries")
            .column_as(Expr::col(kardex_entry::Column::Quantity).sum(), "quantity")
            .filter(kardex_entry::Column::WarehouseId.eq(warehouse_id))
            .filter(kardex_entry::Column::ArticleId.eq(article_id))
            .into_tuple::<(Option<i64>, Option<Decimal>)>()
            .one(&*self.db_pool)
            .await?;

        let (entries, quantity) = row.unwrap_or((None, None));
        Ok(KardexTotals {
            entries: entries.unwrap_or(0).max(0) as u64,
            quantity: quantity.unwrap_or(Decimal::ZERO),
        })
    }
}
