mod guests;
mod id;
mod period;
mod price;
mod status;

pub use self::{guests::*, id::*, period::*, price::*, status::*};
use crate::entity::common::{CreatedAt, UpdatedAt};
use crate::entity::{PricePerNight, PropertyId, UserId};
use crate::KernelError;
use destructure::{Destructure, Mutation};
use error_stack::Report;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Booking {
    id: BookingId,
    property_id: PropertyId,
    user_id: UserId,
    period: BookingPeriod,
    total_guests: GuestCount,
    total_price: TotalPrice,
    status: BookingStatus,
    created_at: CreatedAt<Booking>,
    updated_at: UpdatedAt<Booking>,
}

impl Booking {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookingId,
        property_id: PropertyId,
        user_id: UserId,
        period: BookingPeriod,
        total_guests: GuestCount,
        total_price: TotalPrice,
        status: BookingStatus,
        created_at: CreatedAt<Booking>,
        updated_at: UpdatedAt<Booking>,
    ) -> Self {
        Self {
            id,
            property_id,
            user_id,
            period,
            total_guests,
            total_price,
            status,
            created_at,
            updated_at,
        }
    }

    /// New reservation in [`BookingStatus::Pending`], priced from the nightly rate.
    pub fn reserve(
        id: BookingId,
        property_id: PropertyId,
        user_id: UserId,
        period: BookingPeriod,
        total_guests: GuestCount,
        price_per_night: &PricePerNight,
    ) -> Self {
        let total_price = TotalPrice::quote(price_per_night, &period);
        let created_at = CreatedAt::now();
        let updated_at = UpdatedAt::new(*created_at.as_ref());
        Self::new(
            id,
            property_id,
            user_id,
            period,
            total_guests,
            total_price,
            BookingStatus::Pending,
            created_at,
            updated_at,
        )
    }

    pub fn nights(&self) -> i64 {
        self.period.nights()
    }

    /// Whether this booking prevents `period` from being reserved on the same property.
    pub fn blocks(&self, period: &BookingPeriod) -> bool {
        self.status.is_active() && self.period.overlaps(period)
    }

    pub fn confirm(&mut self) -> error_stack::Result<(), KernelError> {
        self.transit(BookingTransition::Confirm)
    }

    pub fn check_in(&mut self) -> error_stack::Result<(), KernelError> {
        self.transit(BookingTransition::CheckIn)
    }

    pub fn check_out(&mut self) -> error_stack::Result<(), KernelError> {
        self.transit(BookingTransition::CheckOut)
    }

    pub fn cancel(&mut self) -> error_stack::Result<(), KernelError> {
        self.transit(BookingTransition::Cancel)
    }

    pub fn transit(&mut self, transition: BookingTransition) -> error_stack::Result<(), KernelError> {
        let next = transition.target(self.status).ok_or_else(|| {
            Report::new(KernelError::InvalidStateTransition(transition))
                .attach_printable(format!("booking: {:?}, status: {}", self.id, self.status))
        })?;
        self.substitute(|booking| {
            *booking.status = next;
            *booking.updated_at = UpdatedAt::now();
        });
        Ok(())
    }

    pub fn change_guests(&mut self, total_guests: GuestCount) {
        self.substitute(|booking| {
            *booking.total_guests = total_guests;
            *booking.updated_at = UpdatedAt::now();
        });
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use crate::entity::{
        Booking, BookingId, BookingPeriod, BookingStatus, BookingTransition, GuestCount,
        PricePerNight, PropertyId, TotalPrice, UserId,
    };
    use crate::KernelError;

    fn pending() -> Booking {
        Booking::reserve(
            BookingId::new(Uuid::new_v4()),
            PropertyId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            BookingPeriod::new(datetime!(2024-01-10 0:00 UTC), datetime!(2024-01-15 0:00 UTC))
                .unwrap(),
            GuestCount::new(2).unwrap(),
            &PricePerNight::new(100).unwrap(),
        )
    }

    fn rejected(result: error_stack::Result<(), KernelError>, transition: BookingTransition) {
        let error = result.unwrap_err();
        assert_eq!(
            error.current_context(),
            &KernelError::InvalidStateTransition(transition)
        );
    }

    #[test]
    fn reserve_starts_pending() {
        let booking = pending();
        assert_eq!(booking.status(), &BookingStatus::Pending);
        assert_eq!(booking.total_price(), &TotalPrice::new(500));
        assert_eq!(booking.nights(), 5);
        assert_eq!(booking.created_at().as_ref(), booking.updated_at().as_ref());
    }

    #[test]
    fn happy_path() {
        let mut booking = pending();
        booking.confirm().unwrap();
        assert_eq!(booking.status(), &BookingStatus::Confirmed);
        booking.check_in().unwrap();
        assert_eq!(booking.status(), &BookingStatus::Completed);
        booking.check_out().unwrap();
        assert_eq!(booking.status(), &BookingStatus::Completed);
    }

    #[test]
    fn transition_touches_only_status_and_updated_at() {
        let before = pending();
        let mut after = before.clone();
        after.confirm().unwrap();

        assert!(after.updated_at().as_ref() >= before.updated_at().as_ref());
        assert_eq!(after.id(), before.id());
        assert_eq!(after.property_id(), before.property_id());
        assert_eq!(after.user_id(), before.user_id());
        assert_eq!(after.period(), before.period());
        assert_eq!(after.total_guests(), before.total_guests());
        assert_eq!(after.total_price(), before.total_price());
        assert_eq!(after.created_at(), before.created_at());
    }

    #[test]
    fn check_out_is_idempotent() {
        let mut booking = pending();
        booking.confirm().unwrap();
        booking.check_in().unwrap();
        booking.check_out().unwrap();
        booking.check_out().unwrap();
        assert_eq!(booking.status(), &BookingStatus::Completed);
    }

    #[test]
    fn guards() {
        let mut booking = pending();
        rejected(booking.check_in(), BookingTransition::CheckIn);
        rejected(booking.check_out(), BookingTransition::CheckOut);

        booking.cancel().unwrap();
        assert_eq!(booking.status(), &BookingStatus::Cancelled);
        rejected(booking.confirm(), BookingTransition::Confirm);
        rejected(booking.cancel(), BookingTransition::Cancel);
        rejected(booking.check_out(), BookingTransition::CheckOut);

        let mut booking = pending();
        booking.confirm().unwrap();
        rejected(booking.confirm(), BookingTransition::Confirm);
        booking.check_in().unwrap();
        rejected(booking.cancel(), BookingTransition::Cancel);
    }

    #[test]
    fn failed_transition_keeps_state() {
        let mut booking = pending();
        booking.cancel().unwrap();
        let snapshot = booking.clone();
        assert!(booking.confirm().is_err());
        assert_eq!(booking, snapshot);
    }

    #[test]
    fn cancelled_does_not_block() {
        let mut booking = pending();
        let crossing =
            BookingPeriod::new(datetime!(2024-01-12 0:00 UTC), datetime!(2024-01-20 0:00 UTC))
                .unwrap();
        let touching =
            BookingPeriod::new(datetime!(2024-01-15 0:00 UTC), datetime!(2024-01-18 0:00 UTC))
                .unwrap();
        assert!(booking.blocks(&crossing));
        assert!(!booking.blocks(&touching));

        booking.cancel().unwrap();
        assert!(!booking.blocks(&crossing));
    }
}
