use axum::{extract::State, Json};

use service::payments::{self, PaymentDetail};

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// `/api/payment/info` 与 `/api/transaction/info` 共用
#[utoipa::path(get, path = "/api/payment/info", tag = "payments", responses((status = 200, description = "Payments with rental, car and renter"), (status = 403, description = "Forbidden")))]
pub async fn payment_info(State(state): State<ServerState>) -> Result<Json<Vec<PaymentDetail>>, JsonApiError> {
    Ok(Json(payments::payment_info(&state.db).await?))
}
