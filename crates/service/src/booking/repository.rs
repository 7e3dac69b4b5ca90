use async_trait::async_trait;

use super::domain::{BookingReceipt, CarAvailability, NewBooking};
use super::errors::BookingError;

/// Persistence seam for bookings.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_car(&self, car_id: i32) -> Result<Option<CarAvailability>, BookingError>;

    /// Write rental, payment and the availability flip atomically.
    ///
    /// Returns `CarUnavailable` when another booking took the car first; nothing is written then.
    async fn commit_booking(&self, booking: NewBooking) -> Result<BookingReceipt, BookingError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use models::{payment, rental};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockBookingRepository {
        cars: Mutex<HashMap<i32, bool>>, // key: car_id, value: available
        receipts: Mutex<Vec<BookingReceipt>>,
    }

    impl MockBookingRepository {
        pub fn with_car(self, car_id: i32, available: bool) -> Self {
            self.cars.lock().unwrap().insert(car_id, available);
            self
        }

        pub fn is_available(&self, car_id: i32) -> Option<bool> {
            self.cars.lock().unwrap().get(&car_id).copied()
        }

        pub fn committed(&self) -> usize { self.receipts.lock().unwrap().len() }

        /// Make the car available again so benchmarks can book repeatedly.
        pub fn release(&self, car_id: i32) {
            self.cars.lock().unwrap().insert(car_id, true);
        }
    }

    #[async_trait]
    impl BookingRepository for MockBookingRepository {
        async fn find_car(&self, car_id: i32) -> Result<Option<CarAvailability>, BookingError> {
            let cars = self.cars.lock().unwrap();
            Ok(cars.get(&car_id).map(|&available| CarAvailability { id: car_id, available }))
        }

        async fn commit_booking(&self, booking: NewBooking) -> Result<BookingReceipt, BookingError> {
            let mut cars = self.cars.lock().unwrap();
            match cars.get_mut(&booking.car_id) {
                Some(available) if *available => *available = false,
                Some(_) => return Err(BookingError::CarUnavailable(booking.car_id)),
                None => return Err(BookingError::CarNotFound(booking.car_id)),
            }
            let mut receipts = self.receipts.lock().unwrap();
            let id = receipts.len() as i32 + 1;
            let now = Utc::now().into();
            let receipt = BookingReceipt {
                rental: rental::Model {
                    id,
                    user_id: booking.user_id,
                    car_id: booking.car_id,
                    start_date: booking.start_date,
                    end_date: booking.end_date,
                    status: rental::RentalStatus::Approved,
                    created_at: now,
                },
                payment: payment::Model {
                    id,
                    rental_id: id,
                    amount: booking.amount,
                    method: booking.method,
                    status: payment::PaymentStatus::Paid,
                    payment_date: now,
                },
            };
            receipts.push(receipt.clone());
            Ok(receipt)
        }
    }
}
