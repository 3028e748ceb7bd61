use error_stack::{Report, ResultExt};
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::BookingQuery;
use kernel::interface::update::BookingModifier;
use kernel::prelude::entity::{
    Booking, BookingId, BookingPeriod, BookingStatus, CreatedAt, GuestCount, PropertyId,
    TotalPrice, UpdatedAt, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresBookingRepository;

#[async_trait::async_trait]
impl BookingQuery for PostgresBookingRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        PgBookingInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        PgBookingInternal::find_all(con).await
    }

    async fn find_by_user_id(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        PgBookingInternal::find_by_user_id(con, user_id).await
    }

    async fn find_by_property_id(
        &self,
        con: &mut PostgresTransaction,
        property_id: &PropertyId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        PgBookingInternal::find_by_property_id(con, property_id).await
    }

    async fn find_overlapping(
        &self,
        con: &mut PostgresTransaction,
        property_id: &PropertyId,
        period: &BookingPeriod,
        exclude: Option<&BookingId>,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        PgBookingInternal::find_overlapping(con, property_id, period, exclude).await
    }
}

#[async_trait::async_trait]
impl BookingModifier for PostgresBookingRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError> {
        PgBookingInternal::create(con, booking).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError> {
        PgBookingInternal::update(con, booking).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        booking_id: &BookingId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookingInternal::delete(con, booking_id).await
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    property_id: Uuid,
    user_id: Uuid,
    start_date: OffsetDateTime,
    end_date: OffsetDateTime,
    total_guests: i32,
    total_price: i64,
    status: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<BookingRow> for Booking {
    type Error = Report<KernelError>;
    fn try_from(value: BookingRow) -> Result<Self, Self::Error> {
        let period = BookingPeriod::new(value.start_date, value.end_date)
            .change_context(KernelError::Internal)?;
        let total_guests =
            GuestCount::new(value.total_guests).change_context(KernelError::Internal)?;
        let status = value
            .status
            .parse::<BookingStatus>()
            .change_context(KernelError::Internal)?;
        Ok(Booking::new(
            BookingId::new(value.id),
            PropertyId::new(value.property_id),
            UserId::new(value.user_id),
            period,
            total_guests,
            TotalPrice::new(value.total_price),
            status,
            CreatedAt::new(value.created_at),
            UpdatedAt::new(value.updated_at),
        ))
    }
}

fn into_bookings(rows: Vec<BookingRow>) -> error_stack::Result<Vec<Booking>, KernelError> {
    rows.into_iter().map(Booking::try_from).collect()
}

pub(in crate::database) struct PgBookingInternal;

impl PgBookingInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        let row = sqlx::query_as::<_, BookingRow>(
            // language=postgresql
            r#"
            SELECT id, property_id, user_id, start_date, end_date, total_guests, total_price, status, created_at, updated_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Booking::try_from).transpose()
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Booking>, KernelError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            // language=postgresql
            r#"
            SELECT id, property_id, user_id, start_date, end_date, total_guests, total_price, status, created_at, updated_at
            FROM bookings
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        into_bookings(rows)
    }

    async fn find_by_user_id(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            // language=postgresql
            r#"
            SELECT id, property_id, user_id, start_date, end_date, total_guests, total_price, status, created_at, updated_at
            FROM bookings
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        into_bookings(rows)
    }

    async fn find_by_property_id(
        con: &mut PgConnection,
        property_id: &PropertyId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            // language=postgresql
            r#"
            SELECT id, property_id, user_id, start_date, end_date, total_guests, total_price, status, created_at, updated_at
            FROM bookings
            WHERE property_id = $1
            ORDER BY start_date
            "#,
        )
        .bind(property_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        into_bookings(rows)
    }

    async fn find_overlapping(
        con: &mut PgConnection,
        property_id: &PropertyId,
        period: &BookingPeriod,
        exclude: Option<&BookingId>,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        let exclude: Option<Uuid> = exclude.map(|id| *id.as_ref());
        let rows = sqlx::query_as::<_, BookingRow>(
            // language=postgresql
            r#"
            SELECT id, property_id, user_id, start_date, end_date, total_guests, total_price, status, created_at, updated_at
            FROM bookings
            WHERE property_id = $1
              AND status IN ('PENDING', 'CONFIRMED', 'COMPLETED')
              AND start_date < $3
              AND end_date > $2
              AND ($4::uuid IS NULL OR id <> $4)
            ORDER BY start_date
            "#,
        )
        .bind(property_id.as_ref())
        .bind(period.start())
        .bind(period.end())
        .bind(exclude)
        .fetch_all(con)
        .await
        .convert_error()?;
        into_bookings(rows)
    }

    async fn create(con: &mut PgConnection, booking: &Booking) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO bookings (id, property_id, user_id, start_date, end_date, total_guests, total_price, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(booking.id().as_ref())
        .bind(booking.property_id().as_ref())
        .bind(booking.user_id().as_ref())
        .bind(booking.period().start())
        .bind(booking.period().end())
        .bind(booking.total_guests().as_ref())
        .bind(booking.total_price().as_ref())
        .bind(booking.status().as_str())
        .bind(booking.created_at().as_ref())
        .bind(booking.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, booking: &Booking) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE bookings
            SET total_guests = $2, total_price = $3, status = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(booking.id().as_ref())
        .bind(booking.total_guests().as_ref())
        .bind(booking.total_price().as_ref())
        .bind(booking.status().as_str())
        .bind(booking.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, booking_id: &BookingId) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(booking_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookingQuery;
    use kernel::interface::update::{BookingModifier, PropertyModifier};
    use kernel::prelude::entity::{
        Booking, BookingId, BookingPeriod, BookingStatus, CreatedAt, GuestCount, PricePerNight,
        Property, PropertyAddress, PropertyDescription, PropertyId, PropertyStatus,
        PropertyTitle, UserId,
    };
    use kernel::KernelError;

    use crate::database::postgres::{
        PostgresBookingRepository, PostgresDatabase, PostgresPropertyRepository,
    };

    fn property() -> Property {
        Property::new(
            PropertyId::new(Uuid::new_v4()),
            PropertyTitle::new("Test property").unwrap(),
            PropertyDescription::new("A property used by driver tests").unwrap(),
            PropertyAddress::new("1 Test Street").unwrap(),
            PricePerNight::new(100).unwrap(),
            None,
            UserId::new(Uuid::new_v4()),
            PropertyStatus::Available,
            CreatedAt::now(),
        )
    }

    fn booking(property: &Property, period: BookingPeriod) -> Booking {
        Booking::reserve(
            BookingId::new(Uuid::new_v4()),
            property.id().clone(),
            UserId::new(Uuid::new_v4()),
            period,
            GuestCount::new(2).unwrap(),
            property.price_per_night(),
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let property = property();
        PostgresPropertyRepository.create(&mut con, &property).await?;

        let period =
            BookingPeriod::new(datetime!(2024-01-10 0:00 UTC), datetime!(2024-01-15 0:00 UTC))?;
        let mut booking = booking(&property, period);
        PostgresBookingRepository.create(&mut con, &booking).await?;

        let found = PostgresBookingRepository
            .find_by_id(&mut con, booking.id())
            .await?;
        assert_eq!(found.as_ref().map(Booking::id), Some(booking.id()));
        assert_eq!(found.as_ref().map(Booking::period), Some(&period));

        let touching =
            BookingPeriod::new(datetime!(2024-01-15 0:00 UTC), datetime!(2024-01-18 0:00 UTC))?;
        let overlapping = PostgresBookingRepository
            .find_overlapping(&mut con, property.id(), &touching, None)
            .await?;
        assert!(overlapping.is_empty());

        let crossing =
            BookingPeriod::new(datetime!(2024-01-12 0:00 UTC), datetime!(2024-01-20 0:00 UTC))?;
        let overlapping = PostgresBookingRepository
            .find_overlapping(&mut con, property.id(), &crossing, None)
            .await?;
        assert_eq!(overlapping.len(), 1);
        let overlapping = PostgresBookingRepository
            .find_overlapping(&mut con, property.id(), &crossing, Some(booking.id()))
            .await?;
        assert!(overlapping.is_empty());

        booking.cancel()?;
        PostgresBookingRepository.update(&mut con, &booking).await?;
        let found = PostgresBookingRepository
            .find_by_id(&mut con, booking.id())
            .await?;
        assert_eq!(
            found.as_ref().map(Booking::status),
            Some(&BookingStatus::Cancelled)
        );
        let overlapping = PostgresBookingRepository
            .find_overlapping(&mut con, property.id(), &crossing, None)
            .await?;
        assert!(overlapping.is_empty());

        PostgresBookingRepository
            .delete(&mut con, booking.id())
            .await?;
        let found = PostgresBookingRepository
            .find_by_id(&mut con, booking.id())
            .await?;
        assert!(found.is_none());
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn exclusion_constraint() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let property = property();
        PostgresPropertyRepository.create(&mut con, &property).await?;

        let first = booking(
            &property,
            BookingPeriod::new(datetime!(2024-01-10 0:00 UTC), datetime!(2024-01-15 0:00 UTC))?,
        );
        PostgresBookingRepository.create(&mut con, &first).await?;

        let second = booking(
            &property,
            BookingPeriod::new(datetime!(2024-01-12 0:00 UTC), datetime!(2024-01-20 0:00 UTC))?,
        );
        let error = PostgresBookingRepository
            .create(&mut con, &second)
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::PropertyUnavailable);
        Ok(())
    }
}
