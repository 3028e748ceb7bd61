mod booking;
mod property;

pub use self::{booking::BookingRouter, property::PropertyRouter};
