use axum::{extract::{rejection::JsonRejection, Extension, State}, Json};

use common::types::Message;
use service::booking::domain::{BookingReceipt, BookingRequest};

use crate::errors::JsonApiError;
use crate::session::SessionUser;
use crate::state::ServerState;

/// 预订：校验请求后在同一事务中写入租赁、付款并锁定车辆
#[utoipa::path(post, path = "/api/booking", tag = "booking", request_body = crate::openapi::BookingRequestDoc,
    responses(
        (status = 200, description = "Booking committed"),
        (status = 400, description = "Missing fields, invalid dates or car unavailable"),
        (status = 401, description = "Login required"),
        (status = 404, description = "Car not found"),
        (status = 500, description = "Booking failed"),
    ))]
pub async fn create_booking(
    State(state): State<ServerState>,
    Extension(user): Extension<SessionUser>,
    body: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<Message<BookingReceipt>>, JsonApiError> {
    let Json(req) = body?;
    let receipt = state.booking_service().book(user.id, req).await?;
    Ok(Json(Message::with_data("Booking created successfully", receipt)))
}
