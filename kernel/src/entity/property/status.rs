use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyStatus {
    #[default]
    Available,
    Rented,
    Maintenance,
    Inactive,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Available => "AVAILABLE",
            PropertyStatus::Rented => "RENTED",
            PropertyStatus::Maintenance => "MAINTENANCE",
            PropertyStatus::Inactive => "INACTIVE",
        }
    }
}

impl FromStr for PropertyStatus {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(PropertyStatus::Available),
            "RENTED" => Ok(PropertyStatus::Rented),
            "MAINTENANCE" => Ok(PropertyStatus::Maintenance),
            "INACTIVE" => Ok(PropertyStatus::Inactive),
            _ => Err(Report::new(KernelError::InvalidValue)
                .attach_printable(format!("unknown property status: {s}"))),
        }
    }
}
