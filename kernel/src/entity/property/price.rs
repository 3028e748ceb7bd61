use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

/// Nightly rate in the currency's minor unit.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct PricePerNight(i64);

impl PricePerNight {
    pub const MAX: i64 = 1_000_000;

    pub fn new(price: impl Into<i64>) -> error_stack::Result<Self, KernelError> {
        let price = price.into();
        if !(0..=Self::MAX).contains(&price) {
            return Err(Report::new(KernelError::InvalidValue)
                .attach_printable(format!("price per night out of range: {price}")));
        }
        Ok(Self(price))
    }
}
