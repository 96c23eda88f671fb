use crate::stores::StoreError;
use thiserror::Error;

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("room not found: {0}")]
    RoomNotFound(String),

    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("table {0} is reserved")]
    TableReserved(String),

    #[error("no billable lines for table {0}")]
    EmptyBill(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The order was durably persisted but a follow-up step failed, so the
    /// table/ticket state no longer agrees with the order record. Must
    /// reach the operator; the table stays occupied until resolved.
    #[error("reconciliation required for order {order_id}: {reason}")]
    ReconciliationRequired { order_id: String, reason: String },
}

pub type EngineResult<T> = Result<T, EngineError>;
