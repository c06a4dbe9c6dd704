//! In-memory repository tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use payments_types::{
        LineItem, NewPayment, PaymentId, PaymentOrder, PaymentRepository, PaymentStatus,
        RefundResponse, RepoError,
    };

    use crate::{InMemoryRepo, build_repo};

    fn new_payment(private_id: &str) -> NewPayment {
        let order = PaymentOrder {
            currency: "USD".parse().unwrap(),
            amount: 5000,
            redirect_url: "https://shop.test/ok".to_string(),
            cancel_url: "https://shop.test/cancel".to_string(),
            line_items: vec![LineItem {
                name: "Widget".to_string(),
                amount: 5000,
                quantity: 1,
            }],
        };
        NewPayment::created(order, private_id.to_string())
    }

    fn refund(id: &str) -> RefundResponse {
        RefundResponse {
            id: id.to_string(),
            amount: "USD".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = InMemoryRepo::new();

        let id = repo.save(new_payment("O-1")).await.unwrap();
        let payment = repo.find_by_id(id).await.unwrap().unwrap();

        assert_eq!(payment.id, id);
        assert_eq!(payment.private_id, "O-1");
        assert_eq!(payment.status, PaymentStatus::Created);
        assert_eq!(payment.amount, 5000);
        assert!(payment.refunds.is_empty());
    }

    #[tokio::test]
    async fn test_save_assigns_distinct_ids() {
        let repo = InMemoryRepo::new();

        let first = repo.save(new_payment("O-1")).await.unwrap();
        let second = repo.save(new_payment("O-1")).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_find_not_found() {
        let repo = InMemoryRepo::new();

        let result = repo.find_by_id(PaymentId::new()).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_status() {
        let repo = InMemoryRepo::new();
        let id = repo.save(new_payment("O-1")).await.unwrap();

        repo.update_status(id, PaymentStatus::Captured).await.unwrap();

        let payment = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(payment.status, PaymentStatus::Captured);
    }

    #[tokio::test]
    async fn test_update_status_not_found() {
        let repo = InMemoryRepo::new();

        let result = repo
            .update_status(PaymentId::new(), PaymentStatus::Captured)
            .await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_attach_refund_preserves_order() {
        let repo = InMemoryRepo::new();
        let id = repo.save(new_payment("O-1")).await.unwrap();

        repo.attach_refund(id, refund("R-1")).await.unwrap();
        repo.attach_refund(id, refund("R-2")).await.unwrap();

        let payment = repo.find_by_id(id).await.unwrap().unwrap();
        let ids: Vec<_> = payment.refunds.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["R-1", "R-2"]);
    }

    #[tokio::test]
    async fn test_attach_refund_not_found() {
        let repo = InMemoryRepo::new();

        let result = repo.attach_refund(PaymentId::new(), refund("R-1")).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_concurrent_refunds_are_all_kept() {
        let repo = Arc::new(InMemoryRepo::new());
        let id = repo.save(new_payment("O-1")).await.unwrap();

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.attach_refund(id, refund(&format!("R-{}", i)))
                        .await
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let payment = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(payment.refunds.len(), 50);
    }

    #[tokio::test]
    async fn test_repo_wrapper_delegates() {
        let repo = build_repo();
        assert!(repo.is_empty());

        let id = repo.save(new_payment("pi_1")).await.unwrap();
        repo.update_status(id, PaymentStatus::Refund).await.unwrap();
        repo.attach_refund(id, refund("re_1")).await.unwrap();

        let payment = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(payment.status, PaymentStatus::Refund);
        assert_eq!(payment.refunds.len(), 1);
        assert_eq!(repo.len(), 1);
    }
}
