use crate::{
    db::DbPool,
    entities::{business_partner, user, voucher, voucher_line, warehouse},
    errors::ServiceError,
    events::{Event, EventSender},
    services::{
        stock::AppliedMovement, KardexService, ReferenceDataService, StockService,
    },
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction,
    DbBackend, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

/// Request/response types for the voucher orchestrator
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateVoucherRequest {
    #[validate(length(min = 1, max = 12, message = "Voucher code must be 1-12 characters"))]
    pub code: String,
    pub warehouse_id: i32,
    pub movement_type_id: i32,
    /// Authenticated actor id supplied by the caller; token validity is an
    /// external concern.
    pub user_id: i32,
    pub partner_id: Option<i32>,
    pub document_type_id: Option<i32>,
    #[validate(length(max = 4, message = "Document series must be at most 4 characters"))]
    pub document_series: Option<String>,
    #[validate(length(max = 20, message = "Document number must be at most 20 characters"))]
    pub document_number: Option<String>,
    /// Defaults to the registration instant when omitted.
    pub voucher_date: Option<DateTime<Utc>>,
}

/// Header-metadata update. Structural fields (code, warehouse, movement
/// type, actor) are only accepted while the voucher has no applied lines.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateVoucherRequest {
    #[validate(length(min = 1, max = 12, message = "Voucher code must be 1-12 characters"))]
    pub code: Option<String>,
    pub warehouse_id: Option<i32>,
    pub movement_type_id: Option<i32>,
    pub user_id: Option<i32>,
    pub partner_id: Option<i32>,
    pub document_type_id: Option<i32>,
    #[validate(length(max = 4, message = "Document series must be at most 4 characters"))]
    pub document_series: Option<String>,
    #[validate(length(max = 20, message = "Document number must be at most 20 characters"))]
    pub document_number: Option<String>,
    pub voucher_date: Option<DateTime<Utc>>,
}

/// One line of a voucher batch. `quantity` is unsigned; the movement-type
/// factor supplies the sign. Lines without an explicit item number are
/// numbered by position, starting at 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineInput {
    pub article_id: i32,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    pub item_number: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherResponse {
    pub id: i32,
    pub code: String,
    pub warehouse_id: i32,
    pub movement_type_id: i32,
    pub user_id: i32,
    pub partner_id: Option<i32>,
    pub document_type_id: Option<i32>,
    pub document_series: Option<String>,
    pub document_number: Option<String>,
    pub voucher_date: DateTime<Utc>,
    pub registered_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherLineResponse {
    pub id: i32,
    pub item_number: i32,
    pub article_id: i32,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherWithLines {
    pub voucher: VoucherResponse,
    pub lines: Vec<VoucherLineResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoucherListResponse {
    pub vouchers: Vec<VoucherResponse>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Conjunctive voucher search filter. Name filters match substrings of the
/// joined reference row; date bounds are inclusive calendar days parsed as
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoucherQuery {
    pub movement_type_id: Option<i32>,
    pub document_type_id: Option<i32>,
    pub document_number: Option<String>,
    pub warehouse_name: Option<String>,
    pub partner_name: Option<String>,
    pub actor_name: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub include_inactive: bool,
    pub page: u64,
    pub per_page: u64,
}

impl Default for VoucherQuery {
    fn default() -> Self {
        Self {
            movement_type_id: None,
            document_type_id: None,
            document_number: None,
            warehouse_name: None,
            partner_name: None,
            actor_name: None,
            date_from: None,
            date_to: None,
            include_inactive: false,
            page: 1,
            per_page: 20,
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ServiceError::InvalidDateFormat(value.to_string()))
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Voucher orchestrator: validates headers and line batches and drives
/// ledger insert -> stock accumulator -> kardex recorder atomically.
#[derive(Clone)]
pub struct VoucherService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
    reference: ReferenceDataService,
    stock: StockService,
    kardex: KardexService,
}

impl VoucherService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Option<Arc<EventSender>>,
        reference: ReferenceDataService,
        stock: StockService,
        kardex: KardexService,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            reference,
            stock,
            kardex,
        }
    }

    /// Creates a voucher header, active with zero lines.
    #[instrument(skip(self, request), fields(code = %request.code))]
    pub async fn create_voucher(
        &self,
        request: CreateVoucherRequest,
    ) -> Result<VoucherResponse, ServiceError> {
        request.validate()?;

        self.reference.lookup_warehouse(request.warehouse_id).await?;
        self.reference
            .lookup_movement_type(request.movement_type_id)
            .await?;
        self.reference.lookup_user(request.user_id).await?;
        if let Some(partner_id) = request.partner_id {
            self.reference.lookup_partner(partner_id).await?;
        }
        if let Some(document_type_id) = request.document_type_id {
            self.reference.lookup_document_type(document_type_id).await?;
        }

        let db = &*self.db_pool;
        let duplicate = voucher::Entity::find()
            .filter(voucher::Column::Code.eq(request.code.as_str()))
            .one(db)
            .await?;
        if duplicate.is_some() {
            warn!(code = %request.code, "Rejected voucher with duplicate code");
            return Err(ServiceError::DuplicateCode(request.code));
        }

        let now = Utc::now();
        let model = voucher::ActiveModel {
            code: Set(request.code),
            warehouse_id: Set(request.warehouse_id),
            movement_type_id: Set(request.movement_type_id),
            user_id: Set(request.user_id),
            partner_id: Set(request.partner_id),
            document_type_id: Set(request.document_type_id),
            document_series: Set(request.document_series),
            document_number: Set(request.document_number),
            voucher_date: Set(request.voucher_date.unwrap_or(now)),
            registered_at: Set(now),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(voucher_id = model.id, code = %model.code, "Voucher created");
        self.emit(Event::VoucherCreated {
            voucher_id: model.id,
            code: model.code.clone(),
        })
        .await;

        Ok(model_to_response(model))
    }

    /// Applies a line batch to the voucher: one transaction spanning the
    /// ledger inserts, the stock accumulator updates and the kardex appends.
    /// Any line error rolls the whole batch back; nothing partial is ever
    /// observable.
    ///
    /// A voucher takes exactly one batch. Re-deriving stock from edited
    /// lines is not supported; inactivate and create a compensating voucher
    /// instead.
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub async fn add_lines(
        &self,
        voucher_id: i32,
        lines: Vec<LineInput>,
    ) -> Result<(), ServiceError> {
        if lines.is_empty() {
            return Err(ServiceError::ValidationError(
                "a line batch must contain at least one line".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let header = voucher::Entity::find_by_id(voucher_id)
            .one(db)
            .await?
            .ok_or(ServiceError::VoucherNotFound(voucher_id))?;
        if !header.is_active {
            return Err(ServiceError::VoucherImmutable(format!(
                "voucher {voucher_id} is inactive"
            )));
        }

        let movement_type = self
            .reference
            .lookup_movement_type(header.movement_type_id)
            .await?;
        let factor = Decimal::from(movement_type.factor);

        // Everything below validates before any mutation.
        let mut numbered: Vec<(i32, LineInput)> = lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| (line.item_number.unwrap_or(index as i32 + 1), line))
            .collect();
        numbered.sort_by_key(|(item_number, _)| *item_number);

        for window in numbered.windows(2) {
            if window[0].0 == window[1].0 {
                return Err(ServiceError::ValidationError(format!(
                    "duplicate item number {} in line batch",
                    window[0].0
                )));
            }
        }

        for (item_number, line) in &numbered {
            if line.quantity <= Decimal::ZERO {
                return Err(ServiceError::InvalidQuantity(format!(
                    "line {item_number}: quantity must be positive, got {}",
                    line.quantity
                )));
            }
            if line.unit_cost < Decimal::ZERO {
                return Err(ServiceError::InvalidUnitCost(format!(
                    "line {item_number}: unit cost must be non-negative, got {}",
                    line.unit_cost
                )));
            }
            self.reference.lookup_article(line.article_id).await?;
        }

        let batch_id = Uuid::new_v4();
        let txn = db.begin().await?;
        let applied = match self.apply_batch(&txn, &header, factor, &numbered).await {
            Ok(applied) => {
                txn.commit().await?;
                applied
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    error!(error = %rollback_err, voucher_id, %batch_id, "Rollback failed after batch error");
                }
                warn!(error = %err, voucher_id, %batch_id, "Voucher line batch rolled back");
                return Err(err);
            }
        };

        info!(
            voucher_id,
            %batch_id,
            line_count = applied.len(),
            "Voucher lines applied"
        );
        for (article_id, movement) in &applied {
            self.emit(Event::StockAdjusted {
                warehouse_id: header.warehouse_id,
                article_id: *article_id,
                quantity: movement.quantity,
                average_cost: movement.average_cost,
            })
            .await;
        }
        self.emit(Event::VoucherLinesApplied {
            voucher_id,
            line_count: applied.len(),
        })
        .await;

        Ok(())
    }

    async fn apply_batch(
        &self,
        txn: &DatabaseTransaction,
        header: &voucher::Model,
        factor: Decimal,
        numbered: &[(i32, LineInput)],
    ) -> Result<Vec<(i32, AppliedMovement)>, ServiceError> {
        // Re-read the header under lock: the first-application rule must hold
        // against a concurrent batch on the same voucher.
        let select = voucher::Entity::find_by_id(header.id);
        let select = match txn.get_database_backend() {
            DbBackend::Postgres => select.lock_exclusive(),
            _ => select,
        };
        let current = select
            .one(txn)
            .await?
            .ok_or(ServiceError::VoucherNotFound(header.id))?;
        if !current.is_active {
            return Err(ServiceError::VoucherImmutable(format!(
                "voucher {} is inactive",
                header.id
            )));
        }

        let prior = voucher_line::Entity::find()
            .filter(voucher_line::Column::VoucherId.eq(header.id))
            .count(txn)
            .await?;
        if prior > 0 {
            return Err(ServiceError::VoucherImmutable(format!(
                "voucher {} already has {prior} applied lines; inactivate it and create a compensating voucher instead",
                header.id
            )));
        }

        let mut applied = Vec::with_capacity(numbered.len());
        for (item_number, line) in numbered {
            let inserted = voucher_line::ActiveModel {
                voucher_id: Set(header.id),
                item_number: Set(*item_number),
                article_id: Set(line.article_id),
                quantity: Set(line.quantity),
                unit_cost: Set(line.unit_cost),
                is_active: Set(true),
                ..Default::default()
            }
            .insert(txn)
            .await?;

            let signed_quantity = line.quantity * factor;
            let movement = self
                .stock
                .apply_movement(
                    txn,
                    header.warehouse_id,
                    line.article_id,
                    signed_quantity,
                    line.unit_cost,
                )
                .await?;
            self.kardex
                .record(
                    txn,
                    header.warehouse_id,
                    line.article_id,
                    inserted.id,
                    signed_quantity,
                    movement.cost_used,
                    Utc::now(),
                )
                .await?;

            applied.push((line.article_id, movement));
        }

        Ok(applied)
    }

    /// Flags the voucher and all its lines inactive. Deliberately does NOT
    /// reverse the stock/kardex effect; a reversal is a new compensating
    /// voucher with the opposite movement factor.
    #[instrument(skip(self))]
    pub async fn inactivate_voucher(&self, voucher_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let txn = db.begin().await?;

        let header = voucher::Entity::find_by_id(voucher_id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::VoucherNotFound(voucher_id))?;

        let mut active: voucher::ActiveModel = header.into();
        active.is_active = Set(false);
        active.update(&txn).await?;

        voucher_line::Entity::update_many()
            .col_expr(voucher_line::Column::IsActive, Expr::value(false))
            .filter(voucher_line::Column::VoucherId.eq(voucher_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!(voucher_id, "Voucher and its lines inactivated; stock effect retained");
        self.emit(Event::VoucherInactivated { voucher_id }).await;

        Ok(())
    }

    /// Updates header metadata. Structural fields (code, warehouse, movement
    /// type, actor) are rejected once lines exist, since changing them would
    /// invalidate the recorded signs.
    #[instrument(skip(self, request))]
    pub async fn update_voucher_header(
        &self,
        voucher_id: i32,
        request: UpdateVoucherRequest,
    ) -> Result<VoucherResponse, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let header = voucher::Entity::find_by_id(voucher_id)
            .one(db)
            .await?
            .ok_or(ServiceError::VoucherNotFound(voucher_id))?;

        let structural_change = request.code.is_some()
            || request.warehouse_id.is_some()
            || request.movement_type_id.is_some()
            || request.user_id.is_some();
        if structural_change {
            let line_count = voucher_line::Entity::find()
                .filter(voucher_line::Column::VoucherId.eq(voucher_id))
                .count(db)
                .await?;
            if line_count > 0 {
                return Err(ServiceError::VoucherImmutable(format!(
                    "voucher {voucher_id} has applied lines; code, warehouse, movement type and actor are fixed"
                )));
            }
        }

        if let Some(warehouse_id) = request.warehouse_id {
            self.reference.lookup_warehouse(warehouse_id).await?;
        }
        if let Some(movement_type_id) = request.movement_type_id {
            self.reference.lookup_movement_type(movement_type_id).await?;
        }
        if let Some(user_id) = request.user_id {
            self.reference.lookup_user(user_id).await?;
        }
        if let Some(partner_id) = request.partner_id {
            self.reference.lookup_partner(partner_id).await?;
        }
        if let Some(document_type_id) = request.document_type_id {
            self.reference.lookup_document_type(document_type_id).await?;
        }
        if let Some(code) = &request.code {
            if code != &header.code {
                let duplicate = voucher::Entity::find()
                    .filter(voucher::Column::Code.eq(code.as_str()))
                    .one(db)
                    .await?;
                if duplicate.is_some() {
                    return Err(ServiceError::DuplicateCode(code.clone()));
                }
            }
        }

        let mut active: voucher::ActiveModel = header.into();
        if let Some(code) = request.code {
            active.code = Set(code);
        }
        if let Some(warehouse_id) = request.warehouse_id {
            active.warehouse_id = Set(warehouse_id);
        }
        if let Some(movement_type_id) = request.movement_type_id {
            active.movement_type_id = Set(movement_type_id);
        }
        if let Some(user_id) = request.user_id {
            active.user_id = Set(user_id);
        }
        if let Some(partner_id) = request.partner_id {
            active.partner_id = Set(Some(partner_id));
        }
        if let Some(document_type_id) = request.document_type_id {
            active.document_type_id = Set(Some(document_type_id));
        }
        if let Some(document_series) = request.document_series {
            active.document_series = Set(Some(document_series));
        }
        if let Some(document_number) = request.document_number {
            active.document_number = Set(Some(document_number));
        }
        if let Some(voucher_date) = request.voucher_date {
            active.voucher_date = Set(voucher_date);
        }

        let updated = active.update(db).await?;
        info!(voucher_id, "Voucher header updated");

        Ok(model_to_response(updated))
    }

    /// Retrieves a voucher with its lines ordered by item number.
    #[instrument(skip(self))]
    pub async fn get_voucher(&self, voucher_id: i32) -> Result<VoucherWithLines, ServiceError> {
        let db = &*self.db_pool;
        let header = voucher::Entity::find_by_id(voucher_id)
            .one(db)
            .await?
            .ok_or(ServiceError::VoucherNotFound(voucher_id))?;

        let lines = voucher_line::Entity::find()
            .filter(voucher_line::Column::VoucherId.eq(voucher_id))
            .order_by_asc(voucher_line::Column::ItemNumber)
            .all(db)
            .await?;

        Ok(VoucherWithLines {
            voucher: model_to_response(header),
            lines: lines.into_iter().map(line_to_response).collect(),
        })
    }

    /// Lists vouchers matching the conjunctive filter, newest first.
    #[instrument(skip(self, query))]
    pub async fn list_vouchers(
        &self,
        query: VoucherQuery,
    ) -> Result<VoucherListResponse, ServiceError> {
        let db = &*self.db_pool;
        let mut select = voucher::Entity::find();

        if !query.include_inactive {
            select = select.filter(voucher::Column::IsActive.eq(true));
        }
        if let Some(movement_type_id) = query.movement_type_id {
            select = select.filter(voucher::Column::MovementTypeId.eq(movement_type_id));
        }
        if let Some(document_type_id) = query.document_type_id {
            select = select.filter(voucher::Column::DocumentTypeId.eq(document_type_id));
        }
        if let Some(document_number) = &query.document_number {
            select = select.filter(voucher::Column::DocumentNumber.eq(document_number.as_str()));
        }
        if let Some(date_from) = &query.date_from {
            let from = parse_date(date_from)?;
            select = select.filter(voucher::Column::VoucherDate.gte(day_start(from)));
        }
        if let Some(date_to) = &query.date_to {
            let to = parse_date(date_to)?;
            let next = to
                .succ_opt()
                .ok_or_else(|| ServiceError::InvalidDateFormat(date_to.clone()))?;
            select = select.filter(voucher::Column::VoucherDate.lt(day_start(next)));
        }
        if let Some(actor_name) = &query.actor_name {
            select = select
                .join(JoinType::InnerJoin, voucher::Relation::User.def())
                .filter(user::Column::FullName.contains(actor_name.as_str()));
        }
        if let Some(partner_name) = &query.partner_name {
            select = select
                .join(JoinType::InnerJoin, voucher::Relation::Partner.def())
                .filter(business_partner::Column::Name.contains(partner_name.as_str()));
        }
        if let Some(warehouse_name) = &query.warehouse_name {
            select = select
                .join(JoinType::InnerJoin, voucher::Relation::Warehouse.def())
                .filter(warehouse::Column::Name.contains(warehouse_name.as_str()));
        }

        let page = query.page.max(1);
        let per_page = query.per_page.max(1);
        let paginator = select
            .order_by_desc(voucher::Column::RegisteredAt)
            .order_by_desc(voucher::Column::Id)
            .paginate(db, per_page);

        let total = paginator.num_items().await?;
        let vouchers = paginator.fetch_page(page - 1).await?;

        Ok(VoucherListResponse {
            vouchers: vouchers.into_iter().map(model_to_response).collect(),
            total,
            page,
            per_page,
        })
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "Failed to send domain event");
            }
        }
    }
}

fn model_to_response(model: voucher::Model) -> VoucherResponse {
    VoucherResponse {
        id: model.id,
        code: model.code,
        warehouse_id: model.warehouse_id,
        movement_type_id: model.movement_type_id,
        user_id: model.user_id,
        partner_id: model.partner_id,
        document_type_id: model.document_type_id,
        document_series: model.document_series,
        document_number: model.document_number,
        voucher_date: model.voucher_date,
        registered_at: model.registered_at,
        is_active: model.is_active,
    }
}

fn line_to_response(model: voucher_line::Model) -> VoucherLineResponse {
    VoucherLineResponse {
        id: model.id,
        item_number: model.item_number,
        article_id: model.article_id,
        quantity: model.quantity,
        unit_cost: model.unit_cost,
        is_active: model.is_active,
    }
}
