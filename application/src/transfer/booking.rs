use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{Booking, DestructBooking};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookingDto {
    pub id: Uuid,
    pub property_id: Uuid,
    pub user_id: Uuid,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    pub total_guests: i32,
    pub total_price: i64,
    pub status: String,
    pub nights: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Booking> for BookingDto {
    fn from(value: Booking) -> Self {
        let nights = value.nights();
        let DestructBooking {
            id,
            property_id,
            user_id,
            period,
            total_guests,
            total_price,
            status,
            created_at,
            updated_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            property_id: property_id.into(),
            user_id: user_id.into(),
            start_date: *period.start(),
            end_date: *period.end(),
            total_guests: total_guests.into(),
            total_price: total_price.into(),
            status: status.as_str().to_string(),
            nights,
            created_at: *created_at.as_ref(),
            updated_at: *updated_at.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AvailabilityDto {
    pub property_id: Uuid,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    pub available: bool,
    pub nights: i64,
    pub total_price: i64,
}

pub struct GetBookingDto {
    pub id: Uuid,
}

pub struct GetUserBookingsDto {
    pub user_id: Uuid,
}

pub struct GetPropertyBookingsDto {
    pub property_id: Uuid,
}

pub struct CreateBookingDto {
    pub property_id: Uuid,
    pub user_id: Uuid,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    pub total_guests: i32,
}

pub struct UpdateBookingDto {
    pub id: Uuid,
    pub total_guests: Option<i32>,
}

pub struct DeleteBookingDto {
    pub id: Uuid,
}

/// Target of a lifecycle transition (confirm, cancel, check-in, check-out).
pub struct BookingActionDto {
    pub id: Uuid,
}

pub struct CheckAvailabilityDto {
    pub property_id: Uuid,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
}
