use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Property, PropertyId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait PropertyQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &PropertyId,
    ) -> error_stack::Result<Option<Property>, KernelError>;

    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Property>, KernelError>;
}

pub trait DependOnPropertyQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type PropertyQuery: PropertyQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn property_query(&self) -> &Self::PropertyQuery;
}
