use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

fn bounded(
    field: &str,
    value: impl Into<String>,
    min: usize,
    max: usize,
) -> error_stack::Result<String, KernelError> {
    let value = value.into().trim().to_string();
    let length = value.chars().count();
    if length < min {
        return Err(Report::new(KernelError::InvalidValue).attach_printable(format!(
            "{field} must be at least {min} characters long"
        )));
    }
    if length > max {
        return Err(Report::new(KernelError::InvalidValue)
            .attach_printable(format!("{field} must not exceed {max} characters")));
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct PropertyTitle(String);

impl PropertyTitle {
    pub fn new(title: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded("Title", title, 3, 200).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct PropertyDescription(String);

impl PropertyDescription {
    pub fn new(description: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded("Description", description, 10, 5000).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct PropertyAddress(String);

impl PropertyAddress {
    pub fn new(address: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(Report::new(KernelError::InvalidValue)
                .attach_printable("Address cannot be empty"));
        }
        bounded("Address", address, 5, 500).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }
}
