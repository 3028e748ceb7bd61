use std::fmt::Display;

use error_stack::Context;

use crate::entity::BookingTransition;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    InvalidBookingRange,
    InvalidGuestCount,
    InvalidValue,
    PropertyNotFound,
    BookingNotFound,
    PropertyUnavailable,
    InvalidStateTransition(BookingTransition),
    Concurrency,
    Timeout,
    Internal,
}

/// Coarse classification used by callers that translate kernel failures
/// into transport-level responses.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Timeout,
    Internal,
}

impl KernelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KernelError::InvalidBookingRange
            | KernelError::InvalidGuestCount
            | KernelError::InvalidValue => ErrorKind::Validation,
            KernelError::PropertyNotFound | KernelError::BookingNotFound => ErrorKind::NotFound,
            KernelError::PropertyUnavailable
            | KernelError::InvalidStateTransition(_)
            | KernelError::Concurrency => ErrorKind::Conflict,
            KernelError::Timeout => ErrorKind::Timeout,
            KernelError::Internal => ErrorKind::Internal,
        }
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::InvalidBookingRange => write!(f, "End date must be after start date"),
            KernelError::InvalidGuestCount => write!(f, "Total guests must be between 1 and 50"),
            KernelError::InvalidValue => write!(f, "Invalid value"),
            KernelError::PropertyNotFound => write!(f, "Property not found"),
            KernelError::BookingNotFound => write!(f, "Booking not found"),
            KernelError::PropertyUnavailable => {
                write!(f, "Property is not available for the selected dates")
            }
            KernelError::InvalidStateTransition(transition) => {
                write!(f, "{}", transition.rejection())
            }
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
