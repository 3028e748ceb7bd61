mod id;
mod price;
mod status;
mod text;

pub use self::{id::*, price::*, status::*, text::*};
use crate::entity::common::CreatedAt;
use crate::entity::UserId;
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Property {
    id: PropertyId,
    title: PropertyTitle,
    description: PropertyDescription,
    address: PropertyAddress,
    price_per_night: PricePerNight,
    image_url: Option<ImageUrl>,
    owner_id: UserId,
    status: PropertyStatus,
    created_at: CreatedAt<Property>,
}

impl Property {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PropertyId,
        title: PropertyTitle,
        description: PropertyDescription,
        address: PropertyAddress,
        price_per_night: PricePerNight,
        image_url: Option<ImageUrl>,
        owner_id: UserId,
        status: PropertyStatus,
        created_at: CreatedAt<Property>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            address,
            price_per_night,
            image_url,
            owner_id,
            status,
            created_at,
        }
    }
}
