use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether a booking in this status blocks other reservations of the same dates.
    pub fn is_active(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(BookingStatus::Pending),
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "COMPLETED" => Ok(BookingStatus::Completed),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            _ => Err(Report::new(KernelError::InvalidValue)
                .attach_printable(format!("unknown booking status: {s}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum BookingTransition {
    Confirm,
    CheckIn,
    CheckOut,
    Cancel,
}

impl BookingTransition {
    /// Status reached when the transition is allowed from `from`.
    pub fn target(&self, from: BookingStatus) -> Option<BookingStatus> {
        match (self, from) {
            (BookingTransition::Confirm, BookingStatus::Pending) => Some(BookingStatus::Confirmed),
            (BookingTransition::CheckIn, BookingStatus::Confirmed) => {
                Some(BookingStatus::Completed)
            }
            (BookingTransition::CheckOut, BookingStatus::Completed) => {
                Some(BookingStatus::Completed)
            }
            (BookingTransition::Cancel, BookingStatus::Pending | BookingStatus::Confirmed) => {
                Some(BookingStatus::Cancelled)
            }
            _ => None,
        }
    }

    pub fn rejection(&self) -> &'static str {
        match self {
            BookingTransition::Confirm => "Only pending bookings can be confirmed",
            BookingTransition::CheckIn => "Only confirmed bookings can be checked in",
            BookingTransition::CheckOut => "Cannot check out from non-completed booking",
            BookingTransition::Cancel => "Booking cannot be cancelled in current status",
        }
    }
}

impl Display for BookingTransition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingTransition::Confirm => write!(f, "confirm"),
            BookingTransition::CheckIn => write!(f, "check-in"),
            BookingTransition::CheckOut => write!(f, "check-out"),
            BookingTransition::Cancel => write!(f, "cancel"),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{BookingStatus, BookingTransition};

    const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    #[test]
    fn terminal_states_only_allow_check_out_refresh() {
        for transition in [
            BookingTransition::Confirm,
            BookingTransition::CheckIn,
            BookingTransition::Cancel,
        ] {
            assert_eq!(transition.target(BookingStatus::Completed), None);
            assert_eq!(transition.target(BookingStatus::Cancelled), None);
        }
        assert_eq!(
            BookingTransition::CheckOut.target(BookingStatus::Completed),
            Some(BookingStatus::Completed)
        );
        assert_eq!(BookingTransition::CheckOut.target(BookingStatus::Cancelled), None);
    }

    #[test]
    fn transition_table() {
        let allowed = ALL
            .iter()
            .flat_map(|from| {
                [
                    BookingTransition::Confirm,
                    BookingTransition::CheckIn,
                    BookingTransition::CheckOut,
                    BookingTransition::Cancel,
                ]
                .into_iter()
                .filter_map(move |t| t.target(*from).map(|to| (*from, t, to)))
            })
            .collect::<Vec<_>>();
        assert_eq!(
            allowed,
            vec![
                (
                    BookingStatus::Pending,
                    BookingTransition::Confirm,
                    BookingStatus::Confirmed
                ),
                (
                    BookingStatus::Pending,
                    BookingTransition::Cancel,
                    BookingStatus::Cancelled
                ),
                (
                    BookingStatus::Confirmed,
                    BookingTransition::CheckIn,
                    BookingStatus::Completed
                ),
                (
                    BookingStatus::Confirmed,
                    BookingTransition::Cancel,
                    BookingStatus::Cancelled
                ),
                (
                    BookingStatus::Completed,
                    BookingTransition::CheckOut,
                    BookingStatus::Completed
                ),
            ]
        );
    }

    #[test]
    fn parse_status() {
        for status in ALL {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert!("CHECKED_IN".parse::<BookingStatus>().is_err());
    }
}
