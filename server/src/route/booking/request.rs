use crate::controller::Intake;
use application::transfer::{
    BookingActionDto, CreateBookingDto, DeleteBookingDto, GetBookingDto, GetUserBookingsDto,
    UpdateBookingDto,
};
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    property_id: Uuid,
    user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end_date: OffsetDateTime,
    total_guests: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    total_guests: Option<i32>,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteRequest {
    id: Uuid,
}

impl DeleteRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

/// Path target of `confirm`, `cancel`, `check-in` and `check-out`.
#[derive(Debug)]
pub struct ActionRequest {
    id: Uuid,
}

impl ActionRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct UserBookingsRequest {
    user_id: Uuid,
}

impl UserBookingsRequest {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateBookingDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateBookingDto {
            property_id: input.property_id,
            user_id: input.user_id,
            start_date: input.start_date,
            end_date: input.end_date,
            total_guests: input.total_guests,
        }
    }
}

impl Intake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdateBookingDto;
    fn emit(&self, input: (Uuid, UpdateRequest)) -> Self::To {
        let (id, input) = input;
        UpdateBookingDto {
            id,
            total_guests: input.total_guests,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetBookingDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetBookingDto { id: input.id }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteBookingDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteBookingDto { id: input.id }
    }
}

impl Intake<ActionRequest> for Transformer {
    type To = BookingActionDto;
    fn emit(&self, input: ActionRequest) -> Self::To {
        BookingActionDto { id: input.id }
    }
}

impl Intake<UserBookingsRequest> for Transformer {
    type To = GetUserBookingsDto;
    fn emit(&self, input: UserBookingsRequest) -> Self::To {
        GetUserBookingsDto {
            user_id: input.user_id,
        }
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use crate::controller::Intake;
    use crate::route::booking::request::{CreateRequest, Transformer, UpdateRequest};

    #[test]
    fn create_request_reads_rfc3339() {
        let property_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let body = format!(
            r#"{{
                "property_id": "{property_id}",
                "user_id": "{user_id}",
                "start_date": "2024-01-10T00:00:00Z",
                "end_date": "2024-01-15T12:00:00+09:00",
                "total_guests": 2
            }}"#
        );
        let request: CreateRequest = serde_json::from_str(&body).unwrap();
        let dto = Transformer.emit(request);
        assert_eq!(dto.property_id, property_id);
        assert_eq!(dto.user_id, user_id);
        assert_eq!(dto.start_date, datetime!(2024-01-10 0:00 UTC));
        assert_eq!(dto.end_date, datetime!(2024-01-15 3:00 UTC));
        assert_eq!(dto.total_guests, 2);
    }

    #[test]
    fn create_request_rejects_plain_dates() {
        let body = format!(
            r#"{{
                "property_id": "{}",
                "user_id": "{}",
                "start_date": "2024-01-10",
                "end_date": "2024-01-15",
                "total_guests": 2
            }}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        assert!(serde_json::from_str::<CreateRequest>(&body).is_err());
    }

    #[test]
    fn update_request_guests_are_optional() {
        let id = Uuid::new_v4();
        let request: UpdateRequest = serde_json::from_str("{}").unwrap();
        let dto = Transformer.emit((id, request));
        assert_eq!(dto.id, id);
        assert_eq!(dto.total_guests, None);
    }
}
