//! Payment Application Service
//!
//! Keeps the local payment record consistent with the remote gateway.
//! Contains NO infrastructure logic - pure orchestration over the two ports.

use tracing::{info, instrument, warn};

use payments_types::{
    AppError, GatewayConnector, NewPayment, PartialRefund, Payment, PaymentDetail, PaymentId,
    PaymentOrder, PaymentRepository, PaymentStatus, RefundResponse,
};

/// Application service for payment operations.
///
/// Generic over the record store `R` and the gateway connector `G`, both
/// injected at construction. The store is only written after the gateway has
/// accepted the operation, so a failed remote call never leaves a trace.
///
/// There are no ordering guards: a payment can be captured twice or refunded
/// before it was captured, and each successful refund is recorded.
pub struct PaymentService<R: PaymentRepository, G: GatewayConnector> {
    repo: R,
    gateway: G,
}

impl<R: PaymentRepository, G: GatewayConnector> PaymentService<R, G> {
    /// Creates a new payment service.
    pub fn new(repo: R, gateway: G) -> Self {
        Self { repo, gateway }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns a reference to the configured gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Creates the order at the gateway, then records it with status `created`.
    #[instrument(skip(self, order), fields(gateway = self.gateway.name(), amount = order.amount))]
    pub async fn create_payment(&self, order: PaymentOrder) -> Result<PaymentDetail, AppError> {
        let detail = self.gateway.create_order(&order).await.map_err(|e| {
            warn!(error = %e, "Gateway rejected the order");
            AppError::Creation(e)
        })?;

        let record = NewPayment::created(order, detail.private_id.clone());
        let id = self.repo.save(record).await?;
        info!(payment_id = %id, private_id = %detail.private_id, "Payment created");

        Ok(PaymentDetail {
            id: Some(id),
            ..detail
        })
    }

    /// Confirms the payment at the gateway and marks the record `captured`.
    #[instrument(skip(self), fields(gateway = self.gateway.name()))]
    pub async fn capture_payment(&self, id: PaymentId) -> Result<(), AppError> {
        let payment = self.get_payment(id).await?;

        self.gateway.capture_order(&payment.private_id).await?;
        self.repo.update_status(id, PaymentStatus::Captured).await?;

        info!(payment_id = %id, "Payment captured");
        Ok(())
    }

    /// Gets a payment by ID.
    pub async fn get_payment(&self, id: PaymentId) -> Result<Payment, AppError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::payment_not_found(id)))
    }

    /// Refunds (part of) the payment and records the gateway's answer.
    ///
    /// On success the status becomes `refund` whatever it was before.
    #[instrument(skip(self), fields(gateway = self.gateway.name(), amount = refund.amount))]
    pub async fn refund_payment(
        &self,
        id: PaymentId,
        refund: PartialRefund,
    ) -> Result<RefundResponse, AppError> {
        let payment = self.get_payment(id).await?;

        let response = self
            .gateway
            .refund_order(&payment.private_id, refund)
            .await?;

        self.repo.update_status(id, PaymentStatus::Refund).await?;
        self.repo.attach_refund(id, response.clone()).await?;

        info!(payment_id = %id, refund_id = %response.id, "Payment refunded");
        Ok(response)
    }
}
