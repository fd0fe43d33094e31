use crate::{
    config::StockPolicy,
    db::DbPool,
    entities::stock_balance::{self, Entity as StockBalance},
    errors::ServiceError,
};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseTransaction, DbBackend, EntityTrait, QuerySelect,
    Set,
};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, instrument};

/// Ledger precision: four fractional digits, round half up.
const SCALE: u32 = 4;

fn round_ledger(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Moving-average blend for an ingress movement. The egress path never calls
/// this; it consumes at the running average without recomputing it.
fn blend_average(
    old_quantity: Decimal,
    old_average: Decimal,
    ingress_quantity: Decimal,
    unit_cost: Decimal,
) -> Decimal {
    let new_quantity = old_quantity + ingress_quantity;
    if new_quantity <= Decimal::ZERO {
        // Ingress into a balance negative enough to stay non-positive;
        // the average is undefined there, so the previous one is retained.
        return old_average;
    }
    round_ledger((old_quantity * old_average + ingress_quantity * unit_cost) / new_quantity)
}

/// Outcome of one applied movement, consumed by the kardex recorder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedMovement {
    pub quantity: Decimal,
    pub average_cost: Decimal,
    /// Cost the movement was booked at: the line cost on ingress, the
    /// pre-movement running average on egress.
    pub cost_used: Decimal,
}

/// Current stock level of a (warehouse, article) pair. A pair that has never
/// moved reads as the zero balance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StockLevel {
    pub quantity: Decimal,
    pub average_cost: Decimal,
}

/// Stock accumulator: maintains one running (quantity, average cost) balance
/// per (warehouse, article) pair under moving-average costing.
#[derive(Clone)]
pub struct StockService {
    db_pool: Arc<DbPool>,
    policy: StockPolicy,
}

impl StockService {
    pub fn new(db_pool: Arc<DbPool>, policy: StockPolicy) -> Self {
        Self { db_pool, policy }
    }

    pub fn policy(&self) -> StockPolicy {
        self.policy
    }

    /// Applies one signed movement to the pair's balance inside the caller's
    /// transaction, creating the balance row lazily on first movement.
    ///
    /// The row is read under `SELECT ... FOR UPDATE` on backends that
    /// support it (SQLite serializes writers on its own) and the lock wait
    /// is bounded by the configured `lock_wait`; exceeding it surfaces
    /// `LockTimeout` and the caller rolls the whole batch back.
    #[instrument(skip(self, txn))]
    pub async fn apply_movement(
        &self,
        txn: &DatabaseTransaction,
        warehouse_id: i32,
        article_id: i32,
        signed_quantity: Decimal,
        unit_cost: Decimal,
    ) -> Result<AppliedMovement, ServiceError> {
        if signed_quantity.is_zero() {
            return Err(ServiceError::InvalidQuantity(
                "signed quantity must be non-zero".to_string(),
            ));
        }
        if signed_quantity > Decimal::ZERO && unit_cost < Decimal::ZERO {
            return Err(ServiceError::InvalidUnitCost(format!(
                "ingress unit cost must be non-negative, got {unit_cost}"
            )));
        }

        let select = StockBalance::find_by_id((warehouse_id, article_id));
        let select = match txn.get_database_backend() {
            DbBackend::Postgres => select.lock_exclusive(),
            _ => select,
        };

        let existing = timeout(self.policy.lock_wait, select.one(txn))
            .await
            .map_err(|_| ServiceError::LockTimeout {
                warehouse_id,
                article_id,
            })??;

        let (old_quantity, old_average) = match &existing {
            Some(balance) => (balance.quantity, balance.average_cost),
            None => (Decimal::ZERO, Decimal::ZERO),
        };

        let new_quantity = round_ledger(old_quantity + signed_quantity);
        let (new_average, cost_used) = if signed_quantity > Decimal::ZERO {
            (
                blend_average(old_quantity, old_average, signed_quantity, unit_cost),
                unit_cost,
            )
        } else {
            if !self.policy.allow_negative_stock && new_quantity < Decimal::ZERO {
                return Err(ServiceError::InsufficientStock {
                    warehouse_id,
                    article_id,
                    on_hand: old_quantity.to_string(),
                    requested: (-signed_quantity).to_string(),
                });
            }
            (old_average, old_average)
        };

        match existing {
            Some(balance) => {
                let mut active: stock_balance::ActiveModel = balance.into();
                active.quantity = Set(new_quantity);
                active.average_cost = Set(new_average);
                active.update(txn).await?;
            }
            None => {
                let active = stock_balance::ActiveModel {
                    warehouse_id: Set(warehouse_id),
                    article_id: Set(article_id),
                    quantity: Set(new_quantity),
                    average_cost: Set(new_average),
                };
                active.insert(txn).await?;
            }
        }

        debug!(
            warehouse_id,
            article_id,
            quantity = %new_quantity,
            average_cost = %new_average,
            "Stock balance updated"
        );

        Ok(AppliedMovement {
            quantity: new_quantity,
            average_cost: new_average,
            cost_used,
        })
    }

    /// Reads the current balance of a pair. Pairs are created lazily, so a
    /// pair with no history reads as (0, 0) rather than an error.
    #[instrument(skip(self))]
    pub async fn get_balance(
        &self,
        warehouse_id: i32,
        article_id: i32,
    ) -> Result<StockLevel, ServiceError> {
        let balance = StockBalance::find_by_id((warehouse_id, article_id))
            .one(&*self.db_pool)
            .await?;

        Ok(balance
            .map(|b| StockLevel {
                quantity: b.quantity,
                average_cost: b.average_cost,
            })
            .unwrap_or_default())
    }
}
