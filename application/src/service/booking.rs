use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BookingQuery, DependOnBookingQuery, DependOnPropertyQuery, PropertyQuery,
};
use kernel::interface::update::{BookingModifier, DependOnBookingModifier};
use kernel::prelude::entity::{
    Booking, BookingId, BookingPeriod, BookingTransition, GuestCount, PropertyId, TotalPrice,
    UserId,
};
use kernel::KernelError;

use crate::transfer::{
    AvailabilityDto, BookingActionDto, BookingDto, CheckAvailabilityDto, CreateBookingDto,
    DeleteBookingDto, GetBookingDto, GetPropertyBookingsDto, GetUserBookingsDto,
    UpdateBookingDto,
};

fn booking_not_found(id: &Uuid) -> Report<KernelError> {
    Report::new(KernelError::BookingNotFound).attach_printable(format!("booking id: {id}"))
}

fn property_not_found(id: &Uuid) -> Report<KernelError> {
    Report::new(KernelError::PropertyNotFound).attach_printable(format!("property id: {id}"))
}

#[async_trait::async_trait]
pub trait GetBookingService: 'static + Sync + Send + DependOnBookingQuery {
    async fn get_booking(&self, dto: GetBookingDto) -> error_stack::Result<BookingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookingId::new(dto.id);
        let booking = self
            .booking_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| booking_not_found(&dto.id))?;

        Ok(BookingDto::from(booking))
    }

    async fn get_all_bookings(&self) -> error_stack::Result<Vec<BookingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let bookings = self.booking_query().find_all(&mut connection).await?;

        Ok(bookings.into_iter().map(BookingDto::from).collect())
    }

    async fn get_bookings_by_user(
        &self,
        dto: GetUserBookingsDto,
    ) -> error_stack::Result<Vec<BookingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        let bookings = self
            .booking_query()
            .find_by_user_id(&mut connection, &user_id)
            .await?;

        Ok(bookings.into_iter().map(BookingDto::from).collect())
    }

    async fn get_bookings_by_property(
        &self,
        dto: GetPropertyBookingsDto,
    ) -> error_stack::Result<Vec<BookingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let property_id = PropertyId::new(dto.property_id);
        let bookings = self
            .booking_query()
            .find_by_property_id(&mut connection, &property_id)
            .await?;

        Ok(bookings.into_iter().map(BookingDto::from).collect())
    }
}

impl<T> GetBookingService for T where T: DependOnBookingQuery {}

#[async_trait::async_trait]
pub trait CreateBookingService:
    'static + Sync + Send + DependOnPropertyQuery + DependOnBookingQuery + DependOnBookingModifier
{
    /// Reserves a property for `[start_date, end_date)`.
    ///
    /// Every check runs before the single write, and nothing is committed on failure.
    /// The overlap check alone cannot exclude a concurrent reservation of the same
    /// dates; the store is expected to reject such a write with
    /// [`KernelError::PropertyUnavailable`].
    async fn create_booking(
        &self,
        dto: CreateBookingDto,
    ) -> error_stack::Result<BookingDto, KernelError> {
        let period = BookingPeriod::new(dto.start_date, dto.end_date)?;
        let total_guests = GuestCount::new(dto.total_guests)?;

        let mut connection = self.database_connection().transact().await?;

        let property_id = PropertyId::new(dto.property_id);
        let property = self
            .property_query()
            .find_by_id(&mut connection, &property_id)
            .await?
            .ok_or_else(|| property_not_found(&dto.property_id))?;

        let overlapping = self
            .booking_query()
            .find_overlapping(&mut connection, &property_id, &period, None)
            .await?;
        if let Some(conflict) = overlapping.iter().find(|booking| booking.blocks(&period)) {
            let conflict: Uuid = *conflict.id().as_ref();
            tracing::debug!(property_id = %dto.property_id, %conflict, "requested dates overlap");
            return Err(Report::new(KernelError::PropertyUnavailable)
                .attach_printable(format!("overlaps booking {conflict}")));
        }

        let booking = Booking::reserve(
            BookingId::new(Uuid::new_v4()),
            property_id,
            UserId::new(dto.user_id),
            period,
            total_guests,
            property.price_per_night(),
        );
        self.booking_modifier()
            .create(&mut connection, &booking)
            .await?;
        connection.commit().await?;

        let booking = BookingDto::from(booking);
        tracing::info!(booking_id = %booking.id, property_id = %booking.property_id, "booking created");
        Ok(booking)
    }
}

impl<T> CreateBookingService for T where
    T: DependOnPropertyQuery + DependOnBookingQuery + DependOnBookingModifier
{
}

#[async_trait::async_trait]
pub trait UpdateBookingService:
    'static + Sync + Send + DependOnBookingQuery + DependOnBookingModifier
{
    /// Dates, status and price are kept as they are.
    async fn update_booking(
        &self,
        dto: UpdateBookingDto,
    ) -> error_stack::Result<BookingDto, KernelError> {
        let total_guests = dto.total_guests.map(GuestCount::new).transpose()?;

        let mut connection = self.database_connection().transact().await?;

        let id = BookingId::new(dto.id);
        let mut booking = self
            .booking_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| booking_not_found(&dto.id))?;

        let total_guests = total_guests.unwrap_or(*booking.total_guests());
        booking.change_guests(total_guests);

        self.booking_modifier()
            .update(&mut connection, &booking)
            .await?;
        connection.commit().await?;

        Ok(BookingDto::from(booking))
    }
}

impl<T> UpdateBookingService for T where T: DependOnBookingQuery + DependOnBookingModifier {}

#[async_trait::async_trait]
pub trait DeleteBookingService:
    'static + Sync + Send + DependOnBookingQuery + DependOnBookingModifier
{
    async fn delete_booking(&self, dto: DeleteBookingDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookingId::new(dto.id);
        if self
            .booking_query()
            .find_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Err(booking_not_found(&dto.id));
        }

        self.booking_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::info!(booking_id = %dto.id, "booking deleted");
        Ok(())
    }
}

impl<T> DeleteBookingService for T where T: DependOnBookingQuery + DependOnBookingModifier {}

#[async_trait::async_trait]
pub trait BookingLifecycleService:
    'static + Sync + Send + DependOnBookingQuery + DependOnBookingModifier
{
    async fn confirm_booking(
        &self,
        dto: BookingActionDto,
    ) -> error_stack::Result<BookingDto, KernelError> {
        self.transit_booking(dto, BookingTransition::Confirm).await
    }

    async fn cancel_booking(
        &self,
        dto: BookingActionDto,
    ) -> error_stack::Result<BookingDto, KernelError> {
        self.transit_booking(dto, BookingTransition::Cancel).await
    }

    async fn check_in_booking(
        &self,
        dto: BookingActionDto,
    ) -> error_stack::Result<BookingDto, KernelError> {
        self.transit_booking(dto, BookingTransition::CheckIn).await
    }

    async fn check_out_booking(
        &self,
        dto: BookingActionDto,
    ) -> error_stack::Result<BookingDto, KernelError> {
        self.transit_booking(dto, BookingTransition::CheckOut).await
    }

    async fn transit_booking(
        &self,
        dto: BookingActionDto,
        transition: BookingTransition,
    ) -> error_stack::Result<BookingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookingId::new(dto.id);
        let mut booking = self
            .booking_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| booking_not_found(&dto.id))?;

        booking.transit(transition)?;

        self.booking_modifier()
            .update(&mut connection, &booking)
            .await?;
        connection.commit().await?;

        tracing::info!(booking_id = %dto.id, %transition, status = %booking.status(), "booking transitioned");
        Ok(BookingDto::from(booking))
    }
}

impl<T> BookingLifecycleService for T where T: DependOnBookingQuery + DependOnBookingModifier {}

#[async_trait::async_trait]
pub trait CheckAvailabilityService:
    'static + Sync + Send + DependOnPropertyQuery + DependOnBookingQuery
{
    /// Quotes a stay without reserving it.
    async fn check_availability(
        &self,
        dto: CheckAvailabilityDto,
    ) -> error_stack::Result<AvailabilityDto, KernelError> {
        let period = BookingPeriod::new(dto.start_date, dto.end_date)?;

        let mut connection = self.database_connection().transact().await?;

        let property_id = PropertyId::new(dto.property_id);
        let property = self
            .property_query()
            .find_by_id(&mut connection, &property_id)
            .await?
            .ok_or_else(|| property_not_found(&dto.property_id))?;

        let available = !self
            .booking_query()
            .find_overlapping(&mut connection, &property_id, &period, None)
            .await?
            .iter()
            .any(|booking| booking.blocks(&period));

        Ok(AvailabilityDto {
            property_id: dto.property_id,
            start_date: dto.start_date,
            end_date: dto.end_date,
            available,
            nights: period.nights(),
            total_price: TotalPrice::quote(property.price_per_night(), &period).into(),
        })
    }
}

impl<T> CheckAvailabilityService for T where T: DependOnPropertyQuery + DependOnBookingQuery {}
