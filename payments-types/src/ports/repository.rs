//! Repository port trait.
//!
//! The payment record store. Adapters own their data and are injected into
//! the service; no transaction spans more than one call.

use crate::domain::{NewPayment, Payment, PaymentId, PaymentStatus, RefundResponse};
use crate::error::RepoError;

/// Keyed store of payment records.
///
/// `find_by_id` must observe every `save`, `update_status` and
/// `attach_refund` that completed before it. Appending refunds must be
/// atomic per record.
#[async_trait::async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
    /// Persists a new record and returns the id assigned to it.
    async fn save(&self, payment: NewPayment) -> Result<PaymentId, RepoError>;

    /// Gets a payment by ID.
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError>;

    /// Overwrites the status of a payment.
    async fn update_status(&self, id: PaymentId, status: PaymentStatus) -> Result<(), RepoError>;

    /// Appends a refund to the payment's refund list.
    async fn attach_refund(&self, id: PaymentId, refund: RefundResponse) -> Result<(), RepoError>;
}
