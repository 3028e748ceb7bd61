mod booking;
mod property;

pub use self::{booking::*, property::*};
