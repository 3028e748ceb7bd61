use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructProperty, Property};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PropertyDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub price_per_night: i64,
    pub image_url: Option<String>,
    pub owner_id: Uuid,
    pub status: String,
    pub created_at: OffsetDateTime,
}

impl From<Property> for PropertyDto {
    fn from(value: Property) -> Self {
        let DestructProperty {
            id,
            title,
            description,
            address,
            price_per_night,
            image_url,
            owner_id,
            status,
            created_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            address: address.into(),
            price_per_night: price_per_night.into(),
            image_url: image_url.map(Into::into),
            owner_id: owner_id.into(),
            status: status.as_str().to_string(),
            created_at: *created_at.as_ref(),
        }
    }
}

pub struct GetPropertyDto {
    pub id: Uuid,
}

pub struct CreatePropertyDto {
    pub title: String,
    pub description: String,
    pub address: String,
    pub price_per_night: i64,
    pub image_url: Option<String>,
    pub owner_id: Uuid,
}

/// `None` leaves a field untouched; `image_url: Some(None)` clears the image.
pub struct UpdatePropertyDto {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub price_per_night: Option<i64>,
    pub image_url: Option<Option<String>>,
}

pub struct DeletePropertyDto {
    pub id: Uuid,
}
