//! In-memory repository adapter.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use payments_types::{
    NewPayment, Payment, PaymentId, PaymentRepository, PaymentStatus, RefundResponse, RepoError,
};

// ─────────────────────────────────────────────────────────────────────────────
// In-memory Repository
// ─────────────────────────────────────────────────────────────────────────────

/// Volatile keyed store of payment records.
///
/// Mutations go through `get_mut`, which holds the shard write lock for the
/// duration of the change, so appending a refund never loses a concurrent
/// append on the same record. Status updates are last-write-wins.
#[derive(Default)]
pub struct InMemoryRepo {
    payments: DashMap<PaymentId, Payment>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryRepo {
    async fn save(&self, payment: NewPayment) -> Result<PaymentId, RepoError> {
        let id = PaymentId::new();
        self.payments.insert(id, payment.with_id(id));
        debug!(payment_id = %id, "Payment saved");
        Ok(id)
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        Ok(self.payments.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update_status(&self, id: PaymentId, status: PaymentStatus) -> Result<(), RepoError> {
        let mut payment = self.payments.get_mut(&id).ok_or(RepoError::NotFound)?;
        payment.status = status;
        Ok(())
    }

    async fn attach_refund(&self, id: PaymentId, refund: RefundResponse) -> Result<(), RepoError> {
        let mut payment = self.payments.get_mut(&id).ok_or(RepoError::NotFound)?;
        payment.refunds.push(refund);
        Ok(())
    }
}
