use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct GuestCount(i32);

impl GuestCount {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 50;

    pub fn new(count: impl Into<i32>) -> error_stack::Result<Self, KernelError> {
        let count = count.into();
        if !(Self::MIN..=Self::MAX).contains(&count) {
            return Err(Report::new(KernelError::InvalidGuestCount)
                .attach_printable(format!("total guests: {count}")));
        }
        Ok(Self(count))
    }
}
