//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use payments_types::{
    AppError, CreatePaymentRequest, DataResponse, GatewayConnector, PaymentId, PaymentRepository,
    RefundRequest,
};

use crate::PaymentService;

/// Application state shared across handlers.
pub struct AppState<R: PaymentRepository, G: GatewayConnector> {
    pub service: PaymentService<R, G>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Creation(_) | AppError::Gateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self.0 {
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Internal(msg) => {
                msg.clone()
            }
            other => other.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(error = ?self.0, "Request failed");
        }

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

fn parse_payment_id(id: &str) -> Result<PaymentId, ApiError> {
    id.parse()
        .map_err(|_| AppError::BadRequest("Invalid payment ID".into()).into())
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Validate the request and create the payment at the configured gateway.
#[tracing::instrument(skip(state, payload))]
pub async fn create_payment<R: PaymentRepository, G: GatewayConnector>(
    State(state): State<Arc<AppState<R, G>>>,
    payload: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let order = req.validate().map_err(AppError::from)?;

    let detail = state.service.create_payment(order).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// Get payment by ID.
#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn get_payment<R: PaymentRepository, G: GatewayConnector>(
    State(state): State<Arc<AppState<R, G>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id = parse_payment_id(&id)?;

    let payment = state.service.get_payment(payment_id).await?;
    Ok(Json(payment))
}

#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn capture_payment<R: PaymentRepository, G: GatewayConnector>(
    State(state): State<Arc<AppState<R, G>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id = parse_payment_id(&id)?;

    state.service.capture_payment(payment_id).await?;
    Ok(Json(serde_json::json!({})))
}

#[tracing::instrument(skip(state, payload), fields(payment_id = %id))]
pub async fn refund_payment<R: PaymentRepository, G: GatewayConnector>(
    State(state): State<Arc<AppState<R, G>>>,
    Path(id): Path<String>,
    payload: Result<Json<RefundRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id = parse_payment_id(&id)?;
    let Json(req) = payload?;
    let refund = req.validate().map_err(AppError::from)?;

    let response = state.service.refund_payment(payment_id, refund).await?;
    Ok(Json(DataResponse { data: response }))
}
