use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::{BookingPeriod, PricePerNight};

/// Amount in the currency's minor unit.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct TotalPrice(i64);

impl TotalPrice {
    pub fn new(price: impl Into<i64>) -> Self {
        Self(price.into())
    }

    pub fn quote(price_per_night: &PricePerNight, period: &BookingPeriod) -> Self {
        Self(price_per_night.as_ref().saturating_mul(period.nights()))
    }
}
