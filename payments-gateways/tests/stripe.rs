use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path},
};

use payments_gateways::{StripeGateway, stripe};
use payments_types::{
    GatewayConnector, GatewayError, GatewayMode, LineItem, PartialRefund, PaymentOrder,
    PaymentSettings,
};

fn gateway(server: &MockServer) -> StripeGateway {
    let settings = PaymentSettings::new(GatewayMode::Production)
        .with_credential(stripe::API_KEY, "sk_test_123")
        .with_base_url(server.uri());
    StripeGateway::init(settings).unwrap()
}

fn order() -> PaymentOrder {
    PaymentOrder {
        currency: "EUR".parse().unwrap(),
        amount: 4000,
        redirect_url: "https://shop.test/ok".into(),
        cancel_url: "https://shop.test/cancel".into(),
        line_items: vec![LineItem {
            name: "Widget".into(),
            amount: 2000,
            quantity: 2,
        }],
    }
}

#[tokio::test]
async fn test_create_order_posts_checkout_session_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/checkout/sessions"))
        .and(header("authorization", "Bearer sk_test_123"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("line_items%5B0%5D%5Bamount%5D=2000"))
        .and(body_string_contains("line_items%5B0%5D%5Bquantity%5D=2"))
        .and(body_string_contains("mode=payment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_1",
            "url": "https://checkout.stripe.test/cs_test_1",
            "payment_intent": "pi_1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let detail = gateway(&server).create_order(&order()).await.unwrap();

    assert_eq!(detail.private_id, "pi_1");
    assert_eq!(detail.redirect_url, "https://checkout.stripe.test/cs_test_1");
}

#[tokio::test]
async fn test_create_order_falls_back_to_session_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/checkout/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_2",
            "url": "https://checkout.stripe.test/cs_test_2",
            "payment_intent": null
        })))
        .mount(&server)
        .await;

    let detail = gateway(&server).create_order(&order()).await.unwrap();

    assert_eq!(detail.private_id, "cs_test_2");
}

#[tokio::test]
async fn test_create_order_rejected_is_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/checkout/sessions"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid currency"))
        .mount(&server)
        .await;

    let result = gateway(&server).create_order(&order()).await;

    assert_eq!(
        result.unwrap_err(),
        GatewayError::Request {
            status: 400,
            body: "invalid currency".into()
        }
    );
}

#[tokio::test]
async fn test_capture_checks_payment_intent_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payment_intents/pi_paid"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "pi_paid", "status": "succeeded"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/payment_intents/pi_open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"id": "pi_open", "status": "requires_payment_method"}),
        ))
        .mount(&server)
        .await;

    let gateway = gateway(&server);

    assert_eq!(gateway.capture_order("pi_paid").await, Ok(true));
    assert!(matches!(
        gateway.capture_order("pi_open").await,
        Err(GatewayError::Capture(_))
    ));
}

#[tokio::test]
async fn test_capture_checks_session_payment_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/checkout/sessions/cs_test_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_1",
            "payment_status": "paid",
            "payment_intent": "pi_1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(gateway(&server).capture_order("cs_test_1").await, Ok(true));
}

#[tokio::test]
async fn test_capture_lookup_failure_is_capture_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payment_intents/pi_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such payment_intent"))
        .mount(&server)
        .await;

    let result = gateway(&server).capture_order("pi_missing").await;

    assert!(matches!(result, Err(GatewayError::Capture(_))));
}

#[tokio::test]
async fn test_refund_posts_intent_and_amount() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/refunds"))
        .and(body_string_contains("payment_intent=pi_1"))
        .and(body_string_contains("amount=1500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "re_1",
            "amount": 1500,
            "status": "succeeded"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let refund = gateway(&server)
        .refund_order("pi_1", PartialRefund { amount: 1500 })
        .await
        .unwrap();

    assert_eq!(refund.id, "re_1");
    assert_eq!(refund.amount, "1500");
}

#[tokio::test]
async fn test_refund_resolves_session_to_payment_intent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/checkout/sessions/cs_test_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_1",
            "payment_status": "paid",
            "payment_intent": "pi_9"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/refunds"))
        .and(body_string_contains("payment_intent=pi_9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "re_9", "amount": 1000})))
        .expect(1)
        .mount(&server)
        .await;

    let refund = gateway(&server)
        .refund_order("cs_test_1", PartialRefund { amount: 1000 })
        .await
        .unwrap();

    assert_eq!(refund.id, "re_9");
}

#[tokio::test]
async fn test_refund_rejected_is_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/refunds"))
        .respond_with(ResponseTemplate::new(402).set_body_string("charge_already_refunded"))
        .mount(&server)
        .await;

    let result = gateway(&server)
        .refund_order("pi_1", PartialRefund { amount: 1000 })
        .await;

    assert!(matches!(
        result,
        Err(GatewayError::Request { status: 402, .. })
    ));
}
