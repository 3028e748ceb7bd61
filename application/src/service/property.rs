use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnPropertyQuery, PropertyQuery};
use kernel::interface::update::{DependOnPropertyModifier, PropertyModifier};
use kernel::prelude::entity::{
    CreatedAt, ImageUrl, PricePerNight, Property, PropertyAddress, PropertyDescription,
    PropertyId, PropertyStatus, PropertyTitle, UserId,
};
use kernel::KernelError;

use crate::transfer::{
    CreatePropertyDto, DeletePropertyDto, GetPropertyDto, PropertyDto, UpdatePropertyDto,
};

fn property_not_found(id: &Uuid) -> Report<KernelError> {
    Report::new(KernelError::PropertyNotFound).attach_printable(format!("property id: {id}"))
}

#[async_trait::async_trait]
pub trait GetPropertyService: 'static + Sync + Send + DependOnPropertyQuery {
    async fn get_property(
        &self,
        dto: GetPropertyDto,
    ) -> error_stack::Result<PropertyDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = PropertyId::new(dto.id);
        let property = self
            .property_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| property_not_found(&dto.id))?;

        Ok(PropertyDto::from(property))
    }

    async fn get_all_properties(&self) -> error_stack::Result<Vec<PropertyDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let properties = self.property_query().find_all(&mut connection).await?;

        Ok(properties.into_iter().map(PropertyDto::from).collect())
    }
}

impl<T> GetPropertyService for T where T: DependOnPropertyQuery {}

#[async_trait::async_trait]
pub trait CreatePropertyService: 'static + Sync + Send + DependOnPropertyModifier {
    async fn create_property(
        &self,
        dto: CreatePropertyDto,
    ) -> error_stack::Result<PropertyDto, KernelError> {
        let property = Property::new(
            PropertyId::new(Uuid::new_v4()),
            PropertyTitle::new(dto.title)?,
            PropertyDescription::new(dto.description)?,
            PropertyAddress::new(dto.address)?,
            PricePerNight::new(dto.price_per_night)?,
            dto.image_url.map(ImageUrl::new),
            UserId::new(dto.owner_id),
            PropertyStatus::default(),
            CreatedAt::now(),
        );

        let mut connection = self.database_connection().transact().await?;
        self.property_modifier()
            .create(&mut connection, &property)
            .await?;
        connection.commit().await?;

        let property = PropertyDto::from(property);
        tracing::info!(property_id = %property.id, "property created");
        Ok(property)
    }
}

impl<T> CreatePropertyService for T where T: DependOnPropertyModifier {}

#[async_trait::async_trait]
pub trait UpdatePropertyService:
    'static + Sync + Send + DependOnPropertyQuery + DependOnPropertyModifier
{
    async fn update_property(
        &self,
        dto: UpdatePropertyDto,
    ) -> error_stack::Result<PropertyDto, KernelError> {
        let title = dto.title.map(PropertyTitle::new).transpose()?;
        let description = dto.description.map(PropertyDescription::new).transpose()?;
        let address = dto.address.map(PropertyAddress::new).transpose()?;
        let price_per_night = dto.price_per_night.map(PricePerNight::new).transpose()?;
        let image_url = dto.image_url.map(|url| url.map(ImageUrl::new));

        let mut connection = self.database_connection().transact().await?;

        let id = PropertyId::new(dto.id);
        let mut property = self
            .property_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| property_not_found(&dto.id))?;

        property.substitute(|property| {
            if let Some(title) = title {
                *property.title = title;
            }
            if let Some(description) = description {
                *property.description = description;
            }
            if let Some(address) = address {
                *property.address = address;
            }
            if let Some(price_per_night) = price_per_night {
                *property.price_per_night = price_per_night;
            }
            if let Some(image_url) = image_url {
                *property.image_url = image_url;
            }
        });

        self.property_modifier()
            .update(&mut connection, &property)
            .await?;
        connection.commit().await?;

        Ok(PropertyDto::from(property))
    }
}

impl<T> UpdatePropertyService for T where T: DependOnPropertyQuery + DependOnPropertyModifier {}

#[async_trait::async_trait]
pub trait DeletePropertyService:
    'static + Sync + Send + DependOnPropertyQuery + DependOnPropertyModifier
{
    async fn delete_property(
        &self,
        dto: DeletePropertyDto,
    ) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = PropertyId::new(dto.id);
        if self
            .property_query()
            .find_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Err(property_not_found(&dto.id));
        }

        self.property_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::info!(property_id = %dto.id, "property deleted");
        Ok(())
    }
}

impl<T> DeletePropertyService for T where T: DependOnPropertyQuery + DependOnPropertyModifier {}
