//! # Payments Repository
//!
//! Concrete payment record stores (adapters) for the orchestration service.
//! This crate provides the adapters that implement the `PaymentRepository` port.
//!
//! Records live for the lifetime of the process only. There is no durable
//! backend.

use async_trait::async_trait;
use payments_types::{
    NewPayment, Payment, PaymentId, PaymentRepository, PaymentStatus, RefundResponse, RepoError,
};

pub mod memory;

#[cfg(test)]
mod memory_tests;

pub use memory::InMemoryRepo;

/// Repository wrapper handed to the service.
pub struct Repo {
    inner: InMemoryRepo,
}

/// Build an empty, process-scoped record store.
///
/// # Examples
///
/// ```ignore
/// let repo = build_repo();
/// let service = PaymentService::new(repo, gateway);
/// ```
pub fn build_repo() -> Repo {
    Repo::new()
}

impl Repo {
    pub fn new() -> Self {
        Self {
            inner: InMemoryRepo::new(),
        }
    }

    /// Number of stored payments.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for Repo {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement PaymentRepository for Repo (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentRepository for Repo {
    async fn save(&self, payment: NewPayment) -> Result<PaymentId, RepoError> {
        self.inner.save(payment).await
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        self.inner.find_by_id(id).await
    }

    async fn update_status(&self, id: PaymentId, status: PaymentStatus) -> Result<(), RepoError> {
        self.inner.update_status(id, status).await
    }

    async fn attach_refund(&self, id: PaymentId, refund: RefundResponse) -> Result<(), RepoError> {
        self.inner.attach_refund(id, refund).await
    }
}
