use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Booking, BookingId, BookingPeriod, PropertyId, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookingQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError>;

    /// Newest first.
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Booking>, KernelError>;

    /// Newest first.
    async fn find_by_user_id(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Booking>, KernelError>;

    /// Ordered by start date.
    async fn find_by_property_id(
        &self,
        con: &mut Self::Transaction,
        property_id: &PropertyId,
    ) -> error_stack::Result<Vec<Booking>, KernelError>;

    /// Active bookings of `property_id` whose stay intersects `period`.
    async fn find_overlapping(
        &self,
        con: &mut Self::Transaction,
        property_id: &PropertyId,
        period: &BookingPeriod,
        exclude: Option<&BookingId>,
    ) -> error_stack::Result<Vec<Booking>, KernelError>;
}

pub trait DependOnBookingQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookingQuery: BookingQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn booking_query(&self) -> &Self::BookingQuery;
}
