use error_stack::{Report, ResultExt};
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::PropertyQuery;
use kernel::interface::update::PropertyModifier;
use kernel::prelude::entity::{
    CreatedAt, ImageUrl, PricePerNight, Property, PropertyAddress, PropertyDescription,
    PropertyId, PropertyStatus, PropertyTitle, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresPropertyRepository;

#[async_trait::async_trait]
impl PropertyQuery for PostgresPropertyRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &PropertyId,
    ) -> error_stack::Result<Option<Property>, KernelError> {
        PgPropertyInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Property>, KernelError> {
        PgPropertyInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl PropertyModifier for PostgresPropertyRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        property: &Property,
    ) -> error_stack::Result<(), KernelError> {
        PgPropertyInternal::create(con, property).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        property: &Property,
    ) -> error_stack::Result<(), KernelError> {
        PgPropertyInternal::update(con, property).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        property_id: &PropertyId,
    ) -> error_stack::Result<(), KernelError> {
        PgPropertyInternal::delete(con, property_id).await
    }
}

#[derive(sqlx::FromRow)]
struct PropertyRow {
    id: Uuid,
    title: String,
    description: String,
    address: String,
    price_per_night: i64,
    image_url: Option<String>,
    owner_id: Uuid,
    status: String,
    created_at: OffsetDateTime,
}

impl TryFrom<PropertyRow> for Property {
    type Error = Report<KernelError>;
    fn try_from(value: PropertyRow) -> Result<Self, Self::Error> {
        Ok(Property::new(
            PropertyId::new(value.id),
            PropertyTitle::new(value.title).change_context(KernelError::Internal)?,
            PropertyDescription::new(value.description).change_context(KernelError::Internal)?,
            PropertyAddress::new(value.address).change_context(KernelError::Internal)?,
            PricePerNight::new(value.price_per_night).change_context(KernelError::Internal)?,
            value.image_url.map(ImageUrl::new),
            UserId::new(value.owner_id),
            value
                .status
                .parse::<PropertyStatus>()
                .change_context(KernelError::Internal)?,
            CreatedAt::new(value.created_at),
        ))
    }
}

pub(in crate::database) struct PgPropertyInternal;

impl PgPropertyInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &PropertyId,
    ) -> error_stack::Result<Option<Property>, KernelError> {
        let row = sqlx::query_as::<_, PropertyRow>(
            // language=postgresql
            r#"
            SELECT id, title, description, address, price_per_night, image_url, owner_id, status, created_at
            FROM properties
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Property::try_from).transpose()
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Property>, KernelError> {
        sqlx::query_as::<_, PropertyRow>(
            // language=postgresql
            r#"
            SELECT id, title, description, address, price_per_night, image_url, owner_id, status, created_at
            FROM properties
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?
        .into_iter()
        .map(Property::try_from)
        .collect()
    }

    async fn create(
        con: &mut PgConnection,
        property: &Property,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO properties (id, title, description, address, price_per_night, image_url, owner_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(property.id().as_ref())
        .bind(property.title().as_ref())
        .bind(property.description().as_ref())
        .bind(property.address().as_ref())
        .bind(property.price_per_night().as_ref())
        .bind(property.image_url().as_ref().map(AsRef::<String>::as_ref))
        .bind(property.owner_id().as_ref())
        .bind(property.status().as_str())
        .bind(property.created_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(
        con: &mut PgConnection,
        property: &Property,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE properties
            SET title = $2, description = $3, address = $4, price_per_night = $5, image_url = $6, status = $7
            WHERE id = $1
            "#,
        )
        .bind(property.id().as_ref())
        .bind(property.title().as_ref())
        .bind(property.description().as_ref())
        .bind(property.address().as_ref())
        .bind(property.price_per_night().as_ref())
        .bind(property.image_url().as_ref().map(AsRef::<String>::as_ref))
        .bind(property.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        property_id: &PropertyId,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM properties
            WHERE id = $1
            "#,
        )
        .bind(property_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
