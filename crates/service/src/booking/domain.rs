use models::{payment, rental};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

/// Raw booking request as sent by clients; every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub car_id: Option<i32>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub payment: Option<PaymentRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentRequest {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub method: Option<String>,
}

/// Validated booking ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub user_id: i32,
    pub car_id: i32,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub amount: f64,
    pub method: payment::PaymentMethod,
}

/// Availability view of a car used by the pre-transaction checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarAvailability {
    pub id: i32,
    pub available: bool,
}

/// Rows written by a committed booking.
#[derive(Debug, Clone, Serialize)]
pub struct BookingReceipt {
    pub rental: rental::Model,
    pub payment: payment::Model,
}
