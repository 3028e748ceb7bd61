use crate::controller::Exhaust;
use application::transfer::BookingDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    id: Uuid,
    property_id: Uuid,
    user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end_date: OffsetDateTime,
    total_guests: i32,
    total_price: i64,
    nights: i64,
    status: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<BookingDto> for BookingResponse {
    fn from(value: BookingDto) -> Self {
        Self {
            id: value.id,
            property_id: value.property_id,
            user_id: value.user_id,
            start_date: value.start_date,
            end_date: value.end_date,
            total_guests: value.total_guests,
            total_price: value.total_price,
            nights: value.nights,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl IntoResponse for BookingResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct BookingsResponse {
    bookings: Vec<BookingResponse>,
    total: usize,
}

impl IntoResponse for BookingsResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug)]
pub struct CreatedResponse(BookingResponse);

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<BookingDto> for Presenter {
    type To = BookingResponse;
    fn emit(&self, input: BookingDto) -> Self::To {
        BookingResponse::from(input)
    }
}

impl Exhaust<Vec<BookingDto>> for Presenter {
    type To = BookingsResponse;
    fn emit(&self, input: Vec<BookingDto>) -> Self::To {
        let bookings = input
            .into_iter()
            .map(BookingResponse::from)
            .collect::<Vec<_>>();
        BookingsResponse {
            total: bookings.len(),
            bookings,
        }
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

pub struct CreatedPresenter;

impl Exhaust<BookingDto> for CreatedPresenter {
    type To = CreatedResponse;
    fn emit(&self, input: BookingDto) -> Self::To {
        CreatedResponse(BookingResponse::from(input))
    }
}
