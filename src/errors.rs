use serde::Serialize;

/// Error taxonomy for the inventory ledger core.
///
/// Validation errors are reported before any mutation; concurrency errors
/// (`LockTimeout`) mean the whole batch was rolled back and is safe to
/// retry; storage errors also roll back but are not retried automatically.
#[derive(Debug, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(
        #[from]
        #[serde(skip)]
        sea_orm::error::DbErr,
    ),

    #[error("Warehouse not found: {0}")]
    WarehouseNotFound(i32),

    #[error("Article not found: {0}")]
    ArticleNotFound(i32),

    #[error("Movement type not found: {0}")]
    MovementTypeNotFound(i32),

    #[error("User not found: {0}")]
    UserNotFound(i32),

    #[error("Business partner not found: {0}")]
    PartnerNotFound(i32),

    #[error("Document type not found: {0}")]
    DocumentTypeNotFound(i32),

    #[error("Voucher not found: {0}")]
    VoucherNotFound(i32),

    #[error("Voucher code already exists: {0}")]
    DuplicateCode(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid unit cost: {0}")]
    InvalidUnitCost(String),

    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),

    #[error("Voucher is immutable: {0}")]
    VoucherImmutable(String),

    #[error("Insufficient stock for article {article_id} in warehouse {warehouse_id}: on hand {on_hand}, requested {requested}")]
    InsufficientStock {
        warehouse_id: i32,
        article_id: i32,
        on_hand: String,
        requested: String,
    },

    #[error("Lock timeout on stock balance ({warehouse_id}, {article_id})")]
    LockTimeout { warehouse_id: i32, article_id: i32 },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Event error: {0}")]
    EventError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl ServiceError {
    /// Whether the failed operation was rolled back in full and may be
    /// retried verbatim by the caller. The core never retries internally.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockTimeout { .. })
    }

    /// Whether the error was raised by input validation, before any mutation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::WarehouseNotFound(_)
                | Self::ArticleNotFound(_)
                | Self::MovementTypeNotFound(_)
                | Self::UserNotFound(_)
                | Self::PartnerNotFound(_)
                | Self::DocumentTypeNotFound(_)
                | Self::VoucherNotFound(_)
                | Self::DuplicateCode(_)
                | Self::InvalidQuantity(_)
                | Self::InvalidUnitCost(_)
                | Self::InvalidDateFormat(_)
                | Self::ValidationError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_timeout_is_the_only_retryable_error() {
        let timeout = ServiceError::LockTimeout {
            warehouse_id: 1,
            article_id: 2,
        };
        assert!(timeout.is_retryable());
        assert!(!ServiceError::DuplicateCode("V-001".into()).is_retryable());
        assert!(!ServiceError::DatabaseError(sea_orm::DbErr::Custom("io".into())).is_retryable());
    }

    #[test]
    fn validation_errors_are_classified() {
        assert!(ServiceError::ArticleNotFound(7).is_validation());
        assert!(ServiceError::InvalidDateFormat("2024-13-40".into()).is_validation());
        assert!(!ServiceError::LockTimeout {
            warehouse_id: 1,
            article_id: 1
        }
        .is_validation());
    }
}
