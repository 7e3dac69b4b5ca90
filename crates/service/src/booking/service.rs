use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use models::payment::PaymentMethod;
use sea_orm::prelude::DateTimeWithTimeZone;
use tracing::{error, info, instrument, warn};

use super::domain::{BookingReceipt, BookingRequest, NewBooking};
use super::errors::BookingError;
use super::repository::BookingRepository;

/// Accepts RFC 3339 timestamps, or a bare `YYYY-MM-DD` date taken as midnight UTC.
pub fn parse_booking_date(field: &str, raw: &str) -> Result<DateTimeWithTimeZone, BookingError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt);
    }
    if let Some(ndt) = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)) {
        return Ok(Utc.from_utc_datetime(&ndt).into());
    }
    Err(BookingError::Validation(format!("{field} is not a valid date: {raw}")))
}

/// Checks 2-4 of the booking flow: presence, formats, date order.
pub fn validate_request(user_id: i32, req: &BookingRequest) -> Result<NewBooking, BookingError> {
    let mut missing = Vec::new();
    if req.car_id.is_none() {
        missing.push("carId");
    }
    if req.start_date.as_deref().map_or(true, |s| s.trim().is_empty()) {
        missing.push("startDate");
    }
    if req.end_date.as_deref().map_or(true, |s| s.trim().is_empty()) {
        missing.push("endDate");
    }
    let payment = req.payment.clone().unwrap_or_default();
    match payment.amount {
        Some(a) if a.is_finite() && a > 0.0 => {}
        _ => missing.push("payment.amount"),
    }
    if payment.method.as_deref().map_or(true, |m| m.trim().is_empty()) {
        missing.push("payment.method");
    }
    if !missing.is_empty() {
        return Err(BookingError::MissingFields(missing.join(", ")));
    }

    let (Some(car_id), Some(start), Some(end), Some(amount), Some(method)) =
        (req.car_id, req.start_date.as_deref(), req.end_date.as_deref(), payment.amount, payment.method.as_deref())
    else {
        return Err(BookingError::MissingFields("booking".into()));
    };

    let start_date = parse_booking_date("startDate", start)?;
    let end_date = parse_booking_date("endDate", end)?;
    let method: PaymentMethod = method.parse()?;
    if start_date >= end_date {
        return Err(BookingError::InvalidDateRange);
    }

    Ok(NewBooking { user_id, car_id, start_date, end_date, amount, method })
}

/// Booking business service independent of web framework
pub struct BookingService<R: BookingRepository> {
    repo: Arc<R>,
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Validate and commit a booking for `user_id`.
    ///
    /// # Examples
    /// ```
    /// use service::booking::{BookingService, repository::mock::MockBookingRepository};
    /// use service::booking::domain::{BookingRequest, PaymentRequest};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockBookingRepository::default().with_car(7, true));
    /// let svc = BookingService::new(repo.clone());
    /// let req = BookingRequest {
    ///     car_id: Some(7),
    ///     start_date: Some("2030-01-01T10:00:00Z".into()),
    ///     end_date: Some("2030-01-03T10:00:00Z".into()),
    ///     payment: Some(PaymentRequest { amount: Some(700000.0), method: Some("bank".into()) }),
    /// };
    /// let receipt = tokio_test::block_on(svc.book(1, req)).unwrap();
    /// assert_eq!(receipt.rental.car_id, 7);
    /// assert_eq!(repo.is_available(7), Some(false));
    /// ```
    #[instrument(skip(self, req), fields(car_id = ?req.car_id))]
    pub async fn book(&self, user_id: i32, req: BookingRequest) -> Result<BookingReceipt, BookingError> {
        let booking = validate_request(user_id, &req)?;

        let car = self.repo
            .find_car(booking.car_id)
            .await?
            .ok_or(BookingError::CarNotFound(booking.car_id))?;
        if !car.available {
            warn!(car_id = car.id, "booking_rejected_unavailable");
            return Err(BookingError::CarUnavailable(car.id));
        }

        match self.repo.commit_booking(booking).await {
            Ok(receipt) => {
                info!(
                    rental_id = receipt.rental.id,
                    payment_id = receipt.payment.id,
                    amount = receipt.payment.amount,
                    "booking_committed"
                );
                Ok(receipt)
            }
            Err(BookingError::CarUnavailable(id)) => {
                warn!(car_id = id, "booking_lost_race");
                Err(BookingError::CarUnavailable(id))
            }
            Err(e) => {
                error!(error = %e, "booking_failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::domain::PaymentRequest;
    use crate::booking::repository::mock::MockBookingRepository;

    fn request(car_id: i32, start: &str, end: &str) -> BookingRequest {
        BookingRequest {
            car_id: Some(car_id),
            start_date: Some(start.into()),
            end_date: Some(end.into()),
            payment: Some(PaymentRequest { amount: Some(500_000.0), method: Some("ewallet".into()) }),
        }
    }

    #[test]
    fn missing_fields_are_listed() {
        let err = validate_request(1, &BookingRequest::default()).unwrap_err();
        match err {
            BookingError::MissingFields(f) => {
                assert!(f.contains("carId"));
                assert!(f.contains("payment.amount"));
                assert!(f.contains("payment.method"));
            }
            other => panic!("unexpected {other:?}"),
        }
        let mut req = request(1, "2030-01-01", "2030-01-02");
        req.payment = Some(PaymentRequest { amount: Some(0.0), method: Some("BANK".into()) });
        assert!(matches!(validate_request(1, &req), Err(BookingError::MissingFields(_))));
    }

    #[test]
    fn formats_are_checked() {
        assert!(matches!(validate_request(1, &request(1, "tomorrow", "2030-01-02")), Err(BookingError::Validation(_))));
        let mut req = request(1, "2030-01-01", "2030-01-02");
        req.payment = Some(PaymentRequest { amount: Some(10.0), method: Some("cash".into()) });
        assert!(matches!(validate_request(1, &req), Err(BookingError::Validation(_))));
    }

    #[test]
    fn end_must_follow_start() {
        assert!(matches!(
            validate_request(1, &request(1, "2030-01-02T00:00:00Z", "2030-01-02T00:00:00Z")),
            Err(BookingError::InvalidDateRange)
        ));
        assert!(matches!(validate_request(1, &request(1, "2030-01-05", "2030-01-02")), Err(BookingError::InvalidDateRange)));
        let ok = validate_request(3, &request(9, "2030-01-01", "2030-01-02T08:00:00+07:00")).unwrap();
        assert_eq!(ok.user_id, 3);
        assert_eq!(ok.method, PaymentMethod::Ewallet);
    }

    #[tokio::test]
    async fn unknown_and_unavailable_cars() {
        let repo = Arc::new(MockBookingRepository::default().with_car(2, false));
        let svc = BookingService::new(repo.clone());
        let missing = svc.book(1, request(99, "2030-01-01", "2030-01-02")).await;
        assert!(matches!(missing, Err(BookingError::CarNotFound(99))));
        let taken = svc.book(1, request(2, "2030-01-01", "2030-01-02")).await;
        assert!(matches!(taken, Err(BookingError::CarUnavailable(2))));
        assert_eq!(repo.committed(), 0);
    }

    #[tokio::test]
    async fn concurrent_bookings_have_one_winner() {
        let repo = Arc::new(MockBookingRepository::default().with_car(5, true));
        let svc = Arc::new(BookingService::new(repo.clone()));
        let mut handles = Vec::new();
        for user_id in 1..=8 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                svc.book(user_id, request(5, "2030-01-01", "2030-01-04")).await
            }));
        }
        let mut ok = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(e) => assert!(matches!(e, BookingError::CarUnavailable(5))),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(repo.committed(), 1);
    }
}
