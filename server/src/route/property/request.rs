use crate::controller::Intake;
use application::transfer::{
    CheckAvailabilityDto, CreatePropertyDto, DeletePropertyDto, GetPropertyBookingsDto,
    GetPropertyDto, UpdatePropertyDto,
};
use serde::{Deserialize, Deserializer};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    title: String,
    description: String,
    address: String,
    price_per_night: i64,
    #[serde(default)]
    image_url: Option<String>,
    owner_id: Uuid,
}

/// An absent field is left as is; `"image_url": null` removes the image.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    price_per_night: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    image_url: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteRequest {
    id: Uuid,
}

impl DeleteRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct BookingsRequest {
    id: Uuid,
}

impl BookingsRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    #[serde(with = "time::serde::rfc3339")]
    start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end_date: OffsetDateTime,
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreatePropertyDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreatePropertyDto {
            title: input.title,
            description: input.description,
            address: input.address,
            price_per_night: input.price_per_night,
            image_url: input.image_url,
            owner_id: input.owner_id,
        }
    }
}

impl Intake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdatePropertyDto;
    fn emit(&self, input: (Uuid, UpdateRequest)) -> Self::To {
        let (id, input) = input;
        UpdatePropertyDto {
            id,
            title: input.title,
            description: input.description,
            address: input.address,
            price_per_night: input.price_per_night,
            image_url: input.image_url,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetPropertyDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetPropertyDto { id: input.id }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeletePropertyDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeletePropertyDto { id: input.id }
    }
}

impl Intake<BookingsRequest> for Transformer {
    type To = GetPropertyBookingsDto;
    fn emit(&self, input: BookingsRequest) -> Self::To {
        GetPropertyBookingsDto {
            property_id: input.id,
        }
    }
}

impl Intake<(Uuid, AvailabilityRequest)> for Transformer {
    type To = CheckAvailabilityDto;
    fn emit(&self, input: (Uuid, AvailabilityRequest)) -> Self::To {
        let (property_id, input) = input;
        CheckAvailabilityDto {
            property_id,
            start_date: input.start_date,
            end_date: input.end_date,
        }
    }
}
