use crate::controller::Exhaust;
use application::transfer::{AvailabilityDto, PropertyDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    id: Uuid,
    title: String,
    description: String,
    address: String,
    price_per_night: i64,
    image_url: Option<String>,
    owner_id: Uuid,
    status: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<PropertyDto> for PropertyResponse {
    fn from(value: PropertyDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            address: value.address,
            price_per_night: value.price_per_night,
            image_url: value.image_url,
            owner_id: value.owner_id,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

impl IntoResponse for PropertyResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct PropertiesResponse {
    properties: Vec<PropertyResponse>,
    total: usize,
}

impl IntoResponse for PropertiesResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug)]
pub struct CreatedResponse(PropertyResponse);

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    property_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end_date: OffsetDateTime,
    available: bool,
    nights: i64,
    total_price: i64,
}

impl IntoResponse for AvailabilityResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<PropertyDto> for Presenter {
    type To = PropertyResponse;
    fn emit(&self, input: PropertyDto) -> Self::To {
        PropertyResponse::from(input)
    }
}

impl Exhaust<Vec<PropertyDto>> for Presenter {
    type To = PropertiesResponse;
    fn emit(&self, input: Vec<PropertyDto>) -> Self::To {
        let properties = input
            .into_iter()
            .map(PropertyResponse::from)
            .collect::<Vec<_>>();
        PropertiesResponse {
            total: properties.len(),
            properties,
        }
    }
}

impl Exhaust<AvailabilityDto> for Presenter {
    type To = AvailabilityResponse;
    fn emit(&self, input: AvailabilityDto) -> Self::To {
        AvailabilityResponse {
            property_id: input.property_id,
            start_date: input.start_date,
            end_date: input.end_date,
            available: input.available,
            nights: input.nights,
            total_price: input.total_price,
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

impl Exhaust<PropertyDto> for CreatedPresenter {
    type To = CreatedResponse;
    fn emit(&self, input: PropertyDto) -> Self::To {
        CreatedResponse(PropertyResponse::from(input))
    }
}
