use std::ops::{Deref, DerefMut};

use error_stack::{Report, ResultExt};
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnBookingQuery, DependOnPropertyQuery};
use kernel::interface::update::{DependOnBookingModifier, DependOnPropertyModifier};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{booking::*, property::*};

mod booking;
mod property;

static DATABASE_URL: &str = "DATABASE_URL";

const EXCLUSION_VIOLATION: &str = "23P01";
const SERIALIZATION_FAILURE: &str = "40001";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(DATABASE_URL)?;
        let pool = Pool::connect(&url).await.convert_error()?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .change_context(KernelError::Internal)
            .attach_printable("Failed to run migrations")?;
        tracing::info!("connected to postgres");
        Ok(Self { pool })
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<PostgresTransaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(transaction))
    }
}

impl DependOnBookingQuery for PostgresDatabase {
    type BookingQuery = PostgresBookingRepository;
    fn booking_query(&self) -> &Self::BookingQuery {
        &PostgresBookingRepository
    }
}

impl DependOnBookingModifier for PostgresDatabase {
    type BookingModifier = PostgresBookingRepository;
    fn booking_modifier(&self) -> &Self::BookingModifier {
        &PostgresBookingRepository
    }
}

impl DependOnPropertyQuery for PostgresDatabase {
    type PropertyQuery = PostgresPropertyRepository;
    fn property_query(&self) -> &Self::PropertyQuery {
        &PostgresPropertyRepository
    }
}

impl DependOnPropertyModifier for PostgresDatabase {
    type PropertyModifier = PostgresPropertyRepository;
    fn property_modifier(&self) -> &Self::PropertyModifier {
        &PostgresPropertyRepository
    }
}

impl<T> ConvertError for Result<T, Error>
where
    T: 'static,
{
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let code = error
                .as_database_error()
                .and_then(|error| error.code())
                .map(|code| code.into_owned());
            let context = match (&error, code.as_deref()) {
                (Error::PoolTimedOut, _) => KernelError::Timeout,
                (_, Some(EXCLUSION_VIOLATION)) => KernelError::PropertyUnavailable,
                (_, Some(SERIALIZATION_FAILURE)) => KernelError::Concurrency,
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}
