use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    BookingQuery, DependOnBookingQuery, DependOnPropertyQuery, PropertyQuery,
};
use kernel::interface::update::{
    BookingModifier, DependOnBookingModifier, DependOnPropertyModifier, PropertyModifier,
};
use kernel::prelude::entity::{
    Booking, BookingId, BookingPeriod, Property, PropertyId, UserId,
};
use kernel::KernelError;

#[derive(Debug, Clone, Default)]
struct Tables {
    bookings: HashMap<BookingId, Booking>,
    properties: HashMap<PropertyId, Property>,
}

/// Store whose transactions work on a snapshot that is published on commit.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<Mutex<Tables>>,
}

pub struct InMemoryTransaction {
    working: Tables,
    origin: Arc<Mutex<Tables>>,
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let working = self
            .tables
            .lock()
            .map_err(|_| Report::new(KernelError::Internal))?
            .clone();
        Ok(InMemoryTransaction {
            working,
            origin: Arc::clone(&self.tables),
        })
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let mut origin = self
            .origin
            .lock()
            .map_err(|_| Report::new(KernelError::Internal))?;
        *origin = self.working;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

fn newest_first(mut bookings: Vec<Booking>) -> Vec<Booking> {
    bookings.sort_by(|a, b| b.created_at().as_ref().cmp(a.created_at().as_ref()));
    bookings
}

pub struct InMemoryBookingRepository;

#[async_trait::async_trait]
impl BookingQuery for InMemoryBookingRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        Ok(con.working.bookings.get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        Ok(newest_first(
            con.working.bookings.values().cloned().collect(),
        ))
    }

    async fn find_by_user_id(
        &self,
        con: &mut InMemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        Ok(newest_first(
            con.working
                .bookings
                .values()
                .filter(|booking| booking.user_id() == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_property_id(
        &self,
        con: &mut InMemoryTransaction,
        property_id: &PropertyId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        let mut bookings = con
            .working
            .bookings
            .values()
            .filter(|booking| booking.property_id() == property_id)
            .cloned()
            .collect::<Vec<_>>();
        bookings.sort_by_key(|booking| *booking.period().start());
        Ok(bookings)
    }

    async fn find_overlapping(
        &self,
        con: &mut InMemoryTransaction,
        property_id: &PropertyId,
        period: &BookingPeriod,
        exclude: Option<&BookingId>,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        Ok(con
            .working
            .bookings
            .values()
            .filter(|booking| booking.property_id() == property_id)
            .filter(|booking| Some(booking.id()) != exclude)
            .filter(|booking| booking.blocks(period))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl BookingModifier for InMemoryBookingRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError> {
        con.working
            .bookings
            .insert(booking.id().clone(), booking.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError> {
        con.working
            .bookings
            .insert(booking.id().clone(), booking.clone());
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        booking_id: &BookingId,
    ) -> error_stack::Result<(), KernelError> {
        con.working.bookings.remove(booking_id);
        Ok(())
    }
}

pub struct InMemoryPropertyRepository;

#[async_trait::async_trait]
impl PropertyQuery for InMemoryPropertyRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &PropertyId,
    ) -> error_stack::Result<Option<Property>, KernelError> {
        Ok(con.working.properties.get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Property>, KernelError> {
        let mut properties = con.working.properties.values().cloned().collect::<Vec<_>>();
        properties.sort_by(|a, b| b.created_at().as_ref().cmp(a.created_at().as_ref()));
        Ok(properties)
    }
}

#[async_trait::async_trait]
impl PropertyModifier for InMemoryPropertyRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        property: &Property,
    ) -> error_stack::Result<(), KernelError> {
        con.working
            .properties
            .insert(property.id().clone(), property.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        property: &Property,
    ) -> error_stack::Result<(), KernelError> {
        con.working
            .properties
            .insert(property.id().clone(), property.clone());
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        property_id: &PropertyId,
    ) -> error_stack::Result<(), KernelError> {
        con.working.properties.remove(property_id);
        con.working
            .bookings
            .retain(|_, booking| booking.property_id() != property_id);
        Ok(())
    }
}

impl DependOnBookingQuery for InMemoryDatabase {
    type BookingQuery = InMemoryBookingRepository;
    fn booking_query(&self) -> &Self::BookingQuery {
        &InMemoryBookingRepository
    }
}

impl DependOnBookingModifier for InMemoryDatabase {
    type BookingModifier = InMemoryBookingRepository;
    fn booking_modifier(&self) -> &Self::BookingModifier {
        &InMemoryBookingRepository
    }
}

impl DependOnPropertyQuery for InMemoryDatabase {
    type PropertyQuery = InMemoryPropertyRepository;
    fn property_query(&self) -> &Self::PropertyQuery {
        &InMemoryPropertyRepository
    }
}

impl DependOnPropertyModifier for InMemoryDatabase {
    type PropertyModifier = InMemoryPropertyRepository;
    fn property_modifier(&self) -> &Self::PropertyModifier {
        &InMemoryPropertyRepository
    }
}
